/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: replace the input and translate it
    Submit(String),
    /// Bare Enter: translate the current input again
    Shortcut,
    EditText(String),
    Source(String),
    Target(String),
    Swap,
    /// 0 is the main translation, 1.. the alternatives
    Select(usize),
    /// Make arbitrary text the active output
    Pick(String),
    History,
    /// 1-based index into the history listing
    Load(usize),
    Clear,
    Languages,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command :{0} (try :help)")]
    UnknownCommand(String),

    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("Not a number: {0}")]
    InvalidIndex(String),
}

pub const HELP: &str = "\
text            translate text
<enter>         translate the current text again
:text <t>       set the text without translating
:from <code>    source language
:to <code>      target language
:swap           swap languages (a shown translation becomes the input)
:select <n>     0 = main translation, n = alternative n
:pick <text>    use custom text as the output
:history        list past translations
:load <n>       show history entry n
:clear          clear history
:langs          list languages
:show           show the session
:quit           exit";

impl Command {
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            return Ok(Command::Shortcut);
        }

        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Submit(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "text" => Command::EditText(arg.to_string()),
            "from" => Command::Source(required("from", arg)?.to_string()),
            "to" => Command::Target(required("to", arg)?.to_string()),
            "swap" => Command::Swap,
            "select" => Command::Select(index(required("select", arg)?)?),
            "pick" => Command::Pick(required("pick", arg)?.to_string()),
            "history" => Command::History,
            "load" => Command::Load(index(required("load", arg)?)?),
            "clear" => Command::Clear,
            "langs" => Command::Languages,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "q" => Command::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(name: &'static str, arg: &'a str) -> Result<&'a str, ParseError> {
    if arg.is_empty() {
        Err(ParseError::MissingArgument(name))
    } else {
        Ok(arg)
    }
}

fn index(arg: &str) -> Result<usize, ParseError> {
    arg.parse()
        .map_err(|_| ParseError::InvalidIndex(arg.to_string()))
}
