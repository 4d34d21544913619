/// Go token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    EndOfFile,

    // Literals and names
    Identifier,
    IntLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral,
    StringLiteral,

    // Keywords
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,

    // Operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Ampersand,
    Bar,
    Caret,
    LessThanLessThan,
    GreaterThanGreaterThan,
    AmpersandCaret,
    AssignOp,
    AmpersandAmpersand,
    BarBar,
    LessThanMinus,
    PlusPlus,
    MinusMinus,
    EqualsEquals,
    LessThan,
    GreaterThan,
    Equals,
    Exclamation,
    Tilde,
    ExclamationEquals,
    LessThanEquals,
    GreaterThanEquals,
    ColonEquals,
    DotDotDot,

    // Punctuation
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Comma,
    Dot,
    Semicolon,
    Colon,
}

impl SyntaxKind {
    pub fn keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "chan" => SyntaxKind::ChanKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "defer" => SyntaxKind::DeferKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "fallthrough" => SyntaxKind::FallthroughKeyword,
            "for" => SyntaxKind::ForKeyword,
            "func" => SyntaxKind::FuncKeyword,
            "go" => SyntaxKind::GoKeyword,
            "goto" => SyntaxKind::GotoKeyword,
            "if" => SyntaxKind::IfKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "map" => SyntaxKind::MapKeyword,
            "package" => SyntaxKind::PackageKeyword,
            "range" => SyntaxKind::RangeKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "select" => SyntaxKind::SelectKeyword,
            "struct" => SyntaxKind::StructKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "type" => SyntaxKind::TypeKeyword,
            "var" => SyntaxKind::VarKeyword,
            _ => return None,
        })
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImaginaryLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
        )
    }

    /// Tokens after which a newline terminates the statement.
    pub const fn ends_statement(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                SyntaxKind::Identifier
                    | SyntaxKind::BreakKeyword
                    | SyntaxKind::ContinueKeyword
                    | SyntaxKind::FallthroughKeyword
                    | SyntaxKind::ReturnKeyword
                    | SyntaxKind::PlusPlus
                    | SyntaxKind::MinusMinus
                    | SyntaxKind::CloseParen
                    | SyntaxKind::CloseBracket
                    | SyntaxKind::CloseBrace
            )
    }
}
