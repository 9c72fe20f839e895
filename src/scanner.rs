use logos::Logos;

/// Token set of the textual instruction form: one instruction per line,
/// `<mnemonic> <int> <int> [<int>]`. Newlines are significant; everything
/// after a `#` is a comment.
#[derive(PartialEq, Debug, Clone, Logos)]
pub enum TokenKind {
    #[regex("[a-zA-Z_]+[a-zA-Z_0-9]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[token("\n")]
    Newline,

    #[error]
    #[regex(r"[ \t\r\f]+", logos::skip)]
    #[regex(r"#[^\n]*", logos::skip)]
    Error,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tokenize_line() {
        let tokens: Vec<TokenKind> = TokenKind::lexer("load 5 -970 # seed\n").collect();
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("load".into()),
                TokenKind::Int(5),
                TokenKind::Int(-970),
                TokenKind::Newline,
            ]
        );
    }
}
