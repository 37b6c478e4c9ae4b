//! Canned dialogue texts.
//!
//! Everything user-facing lives here so the state machine stays free of
//! string formatting and the texts can be reviewed in one place. All texts
//! are written in the default language; the dispatcher translates them into
//! the session language before sending.

/// `/start` welcome text.
pub const WELCOME: &str = "\u{1F44B} Welcome! This support assistant can help with common crypto issues.\n\n\
Type /help for the main resource link, or type anything to begin.";

/// `/help` text with the resource link spliced in.
pub fn help(help_link: &str) -> String {
    format!(
        "Here is a trusted resource:\n{help_link}\n\n\
         If you want personalized troubleshooting, I can check public wallet data \
         (you must paste your public address)."
    )
}

/// Dialogue opener asking for the language preference.
pub const LANGUAGE_QUESTION: &str = "Hello! \u{1F44B}\n\
Do you speak English? Reply 'yes' or tell me your preferred language.";

/// Confirmation when the user affirms English.
pub const ENGLISH_CONFIRMED: &str =
    "Great — we'll continue in English. What problem are you experiencing?";

/// Confirmation when the user states another language.
pub fn language_noted(stated: &str) -> String {
    format!(
        "Okay — you said '{stated}'. I will attempt to provide replies in that language \
         (translations may be imperfect).\nWhat problem are you experiencing?"
    )
}

/// Prompt shown above the issue menu.
pub const ISSUE_PROMPT: &str = "Choose an issue:";

/// Prompt for the public wallet address, with the safety warning.
pub const ADDRESS_PROMPT: &str = "If you'd like me to check public on-chain info, \
please paste your PUBLIC wallet address now.\n\n\
\u{26A0}\u{FE0F} DO NOT share private keys or seed phrases. Only paste a public address (starts with 0x).";

/// Reprompt after an invalid address.
pub const ADDRESS_INVALID: &str = "That doesn't look like a valid public address. \
Please paste your wallet address (starts with 0x).";

/// Explorer link message for a validated address.
pub fn explorer_link(address: &str) -> String {
    format!(
        "Thanks. I can only check public data. Open the link below to view transactions and balance:\n\n\
         https://bscscan.com/address/{address}\n\n\
         This page shows public on-chain information only (balances, tx history)."
    )
}

/// Issue-specific advice for swapping problems.
pub const SWAPPING_ADVICE: &str = "- Check that you have enough BNB for gas on BSC.\n\
- Verify token allowance and slippage settings for the swap.\n\
- Try a different DEX/router or increase slippage if needed.\n";

/// Issue-specific advice for staking problems.
pub const STAKING_ADVICE: &str = "- Check the staking contract address and token approval status.\n\
- Verify contract state (locked/unlocked) and staking rules.\n";

/// Fallback advice when no specific issue is recorded.
pub const GENERIC_ADVICE: &str = "- Follow steps in the resource for troubleshooting.\n";

/// Wrapper around the advice block.
pub fn next_steps(advice: &str, help_link: &str) -> String {
    format!(
        "Suggested next steps:\n{advice}\nFull resource: {help_link}\n\n\
         I will NOT ask for private keys or seed phrases. If you'd like additional help, \
         describe the exact error or behavior."
    )
}

/// Generic troubleshooting for site/other issues.
pub fn troubleshooting(issue_label: &str, help_link: &str) -> String {
    format!(
        "Thanks — noted the issue: {issue_label}.\n\n\
         - Try clearing cache and refreshing the page\n\
         - Ensure you selected the correct network\n\
         - Try a different wallet or browser\n\n\
         Detailed resource: {help_link}\n\n\
         If you'd like me to check a public wallet address, you can paste it here."
    )
}

/// Closing acknowledgment for `/cancel`.
pub const CANCELLED: &str =
    "Support session closed. Type /help to view the resource link again.";

/// `/cancel` response while a human operator holds the conversation.
pub const CANCEL_IN_MANUAL: &str = "A human operator is handling this conversation. \
It stays open until the operator closes it.";

/// Best-effort outreach DM after a group trigger match.
pub const TRIGGER_OUTREACH: &str = "Hello! \u{1F44B}\n\n\
I can help troubleshoot crypto issues safely. Reply here to continue. \
(I only use public on-chain data.)";

/// Denial for privileged commands from non-privileged callers.
pub const UNAUTHORIZED: &str = "You are not authorized to use this command.";

/// Response to a wrong `/authorize` passcode.
pub const AUTHORIZE_DENIED: &str = "Incorrect code.";

/// Response to a successful `/authorize`.
pub const AUTHORIZE_OK: &str = "You are now authorized.";

/// Reprompt when a menu selection is not recognized.
pub const MENU_UNRECOGNIZED: &str = "Please pick one of the options:";

/// Usage hint for malformed or unknown commands.
pub const UNKNOWN_COMMAND: &str =
    "I don't recognize that command. Try /help, or type anything to start a support session.";
