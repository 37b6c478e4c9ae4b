use async_trait::async_trait;
use helpline_core::{HelplineResult, MenuOption};

/// Outbound operations against the messaging platform.
///
/// Call sites decide whether a failed send is fatal; most treat it as a
/// delivery problem to log and move past.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Name of the channel implementation (for logs).
    fn name(&self) -> &str;

    /// Sends plain text to a chat.
    async fn send_text(&self, chat_id: &str, text: &str) -> HelplineResult<()>;

    /// Sends text with a selectable menu attached.
    async fn send_menu(
        &self,
        chat_id: &str,
        text: &str,
        options: &[MenuOption],
    ) -> HelplineResult<()>;

    /// Edits the text of a previously sent message.
    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: i64,
        text: &str,
    ) -> HelplineResult<()>;
}
