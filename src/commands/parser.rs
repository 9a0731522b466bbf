/// Bot commands the router answers. Anything else starting with `/` is a
/// command for someone else and gets no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

/// Text Telegram treats as a bot command: `/` as the very first character.
pub fn is_command(input: &str) -> bool {
    input.starts_with('/')
}

pub fn parse_command(input: &str) -> Option<Command> {
    if !is_command(input) {
        return None;
    }

    let cmd = input.split_whitespace().next()?.to_lowercase();
    // Group chats address commands as `/start@SomeBot`.
    let cmd = cmd.split('@').next().unwrap_or(&cmd);

    match cmd {
        "/start" => Some(Command::Start),
        "/help" | "/?" => Some(Command::Help),
        _ => None,
    }
}
