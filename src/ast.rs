use std::fmt;

use crate::{
    error::{EvaluationError, EvaluationErrorKind, SyntaxError},
    interpreter::{environment::Environment, evaluator::core::Evaluator, value::Value},
};

/// The type named by a declaration keyword.
///
/// The declared type only chooses the zero value for a declaration without an
/// initializer; it is not enforced on later assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// `no`
    Int,
    /// `binduno`
    Float,
    /// `sach`
    Bool,
    /// `shabd`
    String,
}

impl DeclaredType {
    /// The value bound by `<type> name` with no initializer.
    ///
    /// ```
    /// use hinglish::{ast::DeclaredType, interpreter::value::Value};
    ///
    /// assert_eq!(DeclaredType::Float.zero_value(), Value::Float(0.0));
    /// assert_eq!(DeclaredType::String.zero_value(), Value::Str(String::new()));
    /// ```
    #[must_use]
    pub const fn zero_value(self) -> Value {
        match self {
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Bool => Value::Bool(false),
            Self::String => Value::Str(String::new()),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Int => "no",
                        Self::Float => "binduno",
                        Self::Bool => "sach",
                        Self::String => "shabd",
                    })
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `-x`
    Negate,
    /// `nahin x`
    Not,
}

/// Infix operators, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `aur`
    And,
    /// `ya`
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Add => "+",
                        Self::Sub => "-",
                        Self::Mul => "*",
                        Self::Div => "/",
                        Self::Mod => "%",
                        Self::Less => "<",
                        Self::Greater => ">",
                        Self::LessEqual => "<=",
                        Self::GreaterEqual => ">=",
                        Self::Equal => "==",
                        Self::NotEqual => "!=",
                        Self::And => "aur",
                        Self::Or => "ya",
                    })
    }
}

/// An expression tree over canonical operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A constant.
    Literal(Value),
    /// A variable reference, resolved against the environment when evaluated.
    Identifier(String),
    /// A prefix operation.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
    },
    /// An infix operation.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// A call to a builtin function.
    Call {
        /// The called name.
        name: String,
        /// Argument expressions.
        args: Vec<Self>,
    },
}

/// An expression as written in the source, together with its parse.
///
/// Parse failures are kept rather than raised so they surface when the
/// owning statement runs, in program order.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// The source text of the expression.
    pub text:   String,
    /// The line the expression starts on.
    pub line:   usize,
    /// The parsed tree, or why it could not be parsed.
    pub parsed: Result<Expression, EvaluationErrorKind>,
}

impl Clause {
    /// Evaluates the clause against the current bindings.
    ///
    /// # Errors
    /// Returns an [`EvaluationError`] quoting the clause text if it failed to
    /// parse or if evaluation fails.
    pub fn evaluate(&self, env: &Environment) -> Result<Value, EvaluationError> {
        self.parsed
            .as_ref()
            .map_err(Clone::clone)
            .and_then(|expr| Evaluator::new(env).eval(expr))
            .map_err(|kind| EvaluationError::new(self.text.clone(), self.line, kind))
    }
}

/// An ordered sequence of statements, executed strictly in order.
pub type Block = Vec<Statement>;

/// A statement of the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `no x`, `shabd s = "..."`.
    VarDecl {
        /// The declaration keyword's type.
        declared_type: DeclaredType,
        /// The declared name.
        name:          String,
        /// The initializer, if any.
        initializer:   Option<Clause>,
        /// Line of the declaration keyword.
        line:          usize,
    },
    /// `x = expr`, and the `x++` / `x--` shorthands.
    Assignment {
        /// The assigned name.
        name:  String,
        /// The right-hand side.
        value: Clause,
        /// Line of the assigned name.
        line:  usize,
    },
    /// `likh expr`
    Print {
        /// What to print.
        value: Clause,
        /// Line of the `likh`.
        line:  usize,
    },
    /// `lautao [expr]`
    Return {
        /// The returned value, if any.
        value: Option<Clause>,
        /// Line of the `lautao`.
        line:  usize,
    },
    /// `tod`
    Break {
        /// Line of the `tod`.
        line: usize,
    },
    /// `aage`
    Continue {
        /// Line of the `aage`.
        line: usize,
    },
    /// `agar (cond) { ... } [warna { ... }]`
    If {
        /// The condition.
        condition:  Clause,
        /// Executed when the condition is truthy.
        then_block: Block,
        /// Executed when it is not. `warna agar` chains nest here.
        else_block: Option<Block>,
        /// Line of the `agar`.
        line:       usize,
    },
    /// `jabtk (cond) { ... }`
    While {
        /// Checked before every iteration.
        condition: Clause,
        /// The loop body.
        body:      Block,
        /// Line of the `jabtk`.
        line:      usize,
    },
    /// `chal (init; cond; update) { ... }`
    For {
        /// Executed once before the first check.
        init:      Option<Box<Self>>,
        /// Checked before every iteration. Absent means always true.
        condition: Option<Clause>,
        /// Executed after every iteration that did not break.
        update:    Option<Box<Self>>,
        /// The loop body.
        body:      Block,
        /// Line of the `chal`.
        line:      usize,
    },
    /// Any other expression, evaluated for its errors only.
    Expression {
        /// The expression.
        value: Clause,
        /// Line of the expression.
        line:  usize,
    },
    /// A statement that could not be structured. Reported when reached.
    Invalid(SyntaxError),
}

impl Statement {
    /// The line the statement starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::VarDecl { line, .. }
            | Self::Assignment { line, .. }
            | Self::Print { line, .. }
            | Self::Return { line, .. }
            | Self::Break { line }
            | Self::Continue { line }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::Expression { line, .. } => *line,
            Self::Invalid(error) => error.line(),
        }
    }

    /// A short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::VarDecl { .. } => "declaration",
            Self::Assignment { .. } => "assignment",
            Self::Print { .. } => "print",
            Self::Return { .. } => "return",
            Self::Break { .. } => "break",
            Self::Continue { .. } => "continue",
            Self::If { .. } => "if",
            Self::While { .. } => "while",
            Self::For { .. } => "for",
            Self::Expression { .. } => "expression",
            Self::Invalid(_) => "invalid",
        }
    }
}
