//! Lexer for editing scripts.

use logos::Logos;

/// Tokens of the script language. Newlines are significant.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // Statements
    #[token("move")]
    Move,

    #[token("move-ctrl")]
    MoveCtrl,

    #[token("place")]
    Place,

    #[token("swap")]
    Swap,

    #[token("ctrl")]
    Ctrl,

    #[token("rotate")]
    Rotate,

    #[token("delete")]
    Delete,

    #[token("clear")]
    Clear,

    // Literals
    #[token("pi")]
    Pi,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    FloatLiteral(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    IntLiteral(u64),

    // Directions and gate names
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_ascii_lowercase())]
    Identifier(String),

    // Punctuation
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("\n")]
    Newline,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Move => write!(f, "move"),
            Token::MoveCtrl => write!(f, "move-ctrl"),
            Token::Place => write!(f, "place"),
            Token::Swap => write!(f, "swap"),
            Token::Ctrl => write!(f, "ctrl"),
            Token::Rotate => write!(f, "rotate"),
            Token::Delete => write!(f, "delete"),
            Token::Clear => write!(f, "clear"),
            Token::Pi => write!(f, "pi"),
            Token::FloatLiteral(v) => write!(f, "{v}"),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Newline => write!(f, "end of line"),
        }
    }
}

/// A token with the 1-based line it appeared on.
#[derive(Debug, Clone, PartialEq)]
pub struct LineToken {
    pub token: Token,
    pub line: usize,
}

/// Tokenize a script. Errors carry the line and the offending text.
pub fn tokenize(source: &str) -> Result<Vec<LineToken>, (usize, String)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut line = 1;

    while let Some(result) = lexer.next() {
        match result {
            Ok(Token::Newline) => {
                tokens.push(LineToken {
                    token: Token::Newline,
                    line,
                });
                line += 1;
            }
            Ok(token) => tokens.push(LineToken { token, line }),
            Err(()) => return Err((line, lexer.slice().to_string())),
        }
    }

    Ok(tokens)
}
