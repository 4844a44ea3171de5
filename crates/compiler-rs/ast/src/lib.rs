//! Pascal-- Abstract Syntax Tree (AST)
//!
//! This crate defines the AST node types produced by the parser.
//! The AST is an owned tree: every node owns its children, built bottom-up
//! and never mutated afterwards. Each node records the [`Position`] of the
//! token that introduced it.

use std::fmt;

use tokens::Position;

/// AST node - represents any node in the abstract syntax tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // ===== Program Structure =====
    Program(Program),

    // ===== Declarations =====
    TypeDeclaration(TypeDeclaration),
    ConstDeclaration(ConstDeclaration),
    VariableDeclaration(VariableDeclaration),
    ParameterDeclaration(ParameterDeclaration),
    ProcedureDeclaration(ProcedureDeclaration),
    FunctionDeclaration(FunctionDeclaration),

    // ===== Statements =====
    AssignmentStatement(AssignmentStatement),
    BeginBlock(BeginBlock),
    IfStatement(IfStatement),
    WhileStatement(WhileStatement),
    ForStatement(ForStatement),

    // ===== Expressions =====
    BinaryOp(BinaryOp),
    RelOp(RelOp),
    UnaryOp(UnaryOp),
    NumberLiteral(NumberLiteral),
    StringLiteral(StringLiteral),

    // ===== References =====
    VariableRef(VariableRef),
    ArrayAccess(ArrayAccess),
    Call(Call),
    RecordFieldAccess(RecordFieldAccess),

    // ===== Types =====
    PrimitiveType(PrimitiveType),
    ArrayType(ArrayType),
    Range(Range),
    RecordType(RecordType),
    RecordField(RecordField),
}

/// Program node - root of the AST
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: Option<String>,  // From the optional `program <id>;` header
    pub declarations: Vec<Node>,
    pub body: Box<Node>,       // BeginBlock node
    pub position: Position,
}

/// Type declaration: `id = Type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub name: String,
    pub type_expr: Box<Node>,
    pub position: Position,
}

/// Constant declaration: `id (: Type)? = Expression`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDeclaration {
    pub name: String,
    pub type_expr: Option<Box<Node>>,
    pub value: Box<Node>,      // Expression node
    pub position: Position,
}

/// Variable declaration, one per identifier of the declared list
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub type_expr: Box<Node>,
    pub init_value: Option<Box<Node>>, // Expression node
    pub position: Position,
}

/// Routine parameter, one per identifier of the parameter group
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    pub modifier: Option<ParameterModifier>,
    pub name: String,
    pub type_expr: Box<Node>,
    pub position: Position,
}

/// Parameter passing modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterModifier {
    Var,   // var
    Const, // const
}

impl ParameterModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterModifier::Var => "var",
            ParameterModifier::Const => "const",
        }
    }
}

/// Procedure declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDeclaration {
    pub name: String,
    pub params: Vec<Node>,       // ParameterDeclaration nodes
    pub declarations: Vec<Node>, // Local type/const/var declarations
    pub body: Box<Node>,         // BeginBlock node
    pub position: Position,
}

/// Function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub params: Vec<Node>,       // ParameterDeclaration nodes
    pub return_type: Box<Node>,
    pub declarations: Vec<Node>, // Local type/const/var declarations
    pub body: Box<Node>,         // BeginBlock node
    pub position: Position,
}

/// Assignment statement: `target op value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    pub target: Box<Node>, // Reference node
    pub op: AssignOperator,
    pub value: Box<Node>,  // Expression node
    pub position: Position,
}

/// Assignment operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOperator {
    Assign,    // :=
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
}

impl AssignOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOperator::Assign => ":=",
            AssignOperator::AddAssign => "+=",
            AssignOperator::SubAssign => "-=",
            AssignOperator::MulAssign => "*=",
            AssignOperator::DivAssign => "/=",
        }
    }
}

/// `begin ... end` block
#[derive(Debug, Clone, PartialEq)]
pub struct BeginBlock {
    pub statements: Vec<Node>,
    pub position: Position,
}

/// If statement
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Box<Node>,          // Expression node
    pub then_block: Box<Node>,         // Statement node
    pub else_block: Option<Box<Node>>, // Optional else branch
    pub position: Position,
}

/// While statement
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Box<Node>, // Expression node
    pub body: Box<Node>,      // Statement node
    pub position: Position,
}

/// For statement
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub var_name: String,      // Loop variable
    pub start_expr: Box<Node>, // Expression node (initial value)
    pub direction: ForDirection,
    pub end_expr: Box<Node>,   // Expression node (final value)
    pub body: Box<Node>,       // Statement node
    pub position: Position,
}

/// For loop direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForDirection {
    To,     // for i := 1 to 10
    Downto, // for i := 10 downto 1
}

impl ForDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            ForDirection::To => "to",
            ForDirection::Downto => "downto",
        }
    }
}

/// Arithmetic, logical or shift expression
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: BinaryOperator,
    pub left: Box<Node>,  // Expression node
    pub right: Box<Node>, // Expression node
    pub position: Position,
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Additive
    Add, // +
    Sub, // -
    Or,  // or
    Xor, // xor

    // Multiplicative
    Mul,    // *
    Div,    // /
    IntDiv, // div
    Mod,    // mod
    And,    // and
    Shl,    // shl, <<
    Shr,    // shr, >>
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Or => "or",
            BinaryOperator::Xor => "xor",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::IntDiv => "div",
            BinaryOperator::Mod => "mod",
            BinaryOperator::And => "and",
            BinaryOperator::Shl => "shl",
            BinaryOperator::Shr => "shr",
        }
    }
}

/// Relational expression
#[derive(Debug, Clone, PartialEq)]
pub struct RelOp {
    pub op: RelOperator,
    pub left: Box<Node>,  // Expression node
    pub right: Box<Node>, // Expression node
    pub position: Position,
}

/// Relational operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOperator {
    Eq,  // =
    Neq, // <>
    Lt,  // <
    Gt,  // >
    Lte, // <=
    Gte, // >=
}

impl RelOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            RelOperator::Eq => "=",
            RelOperator::Neq => "<>",
            RelOperator::Lt => "<",
            RelOperator::Gt => ">",
            RelOperator::Lte => "<=",
            RelOperator::Gte => ">=",
        }
    }
}

/// Unary expression
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOperator,
    pub operand: Box<Node>, // Expression node
    pub position: Position,
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,  // + (unary plus)
    Minus, // - (unary minus)
    Not,   // not
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "not",
        }
    }
}

/// Integer or floating-point literal
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: NumberValue,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(i32),
    Float(f64),
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Int(value) => write!(f, "{}", value),
            NumberValue::Float(value) => write!(f, "{}", value),
        }
    }
}

/// String literal; `value` keeps the surrounding quotes
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub position: Position,
}

/// Plain identifier reference
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    pub name: String,
    pub position: Position,
}

/// Indexing: `target[i, j]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub target: Box<Node>,  // Reference node
    pub indices: Vec<Node>, // Expression nodes, never empty
    pub position: Position,
}

/// Call: `callee(args)`; a bare identifier statement is a call with no args
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<Node>, // Reference node
    pub args: Vec<Node>,   // Expression nodes
    pub position: Position,
}

/// Field selection: `record.field`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFieldAccess {
    pub record: Box<Node>, // Reference node
    pub field: String,
    pub position: Position,
}

/// Named type such as `integer` or `string`
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveType {
    pub name: String,
    pub position: Position,
}

/// `array [lo..hi, ...] of element_type`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub ranges: Vec<Node>, // Range nodes, one per dimension
    pub element_type: Box<Node>,
    pub position: Position,
}

/// `low .. high`
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub low: Box<Node>,  // Expression node
    pub high: Box<Node>, // Expression node
    pub position: Position,
}

/// `record ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    pub fields: Vec<Node>, // RecordField nodes
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: String,
    pub type_expr: Box<Node>,
    pub position: Position,
}

/// Indentation of one dump level
const INDENT: &str = "   ";

impl Node {
    /// Get the position of the token that introduced this node
    pub fn position(&self) -> Position {
        match self {
            Node::Program(n) => n.position,
            Node::TypeDeclaration(n) => n.position,
            Node::ConstDeclaration(n) => n.position,
            Node::VariableDeclaration(n) => n.position,
            Node::ParameterDeclaration(n) => n.position,
            Node::ProcedureDeclaration(n) => n.position,
            Node::FunctionDeclaration(n) => n.position,
            Node::AssignmentStatement(n) => n.position,
            Node::BeginBlock(n) => n.position,
            Node::IfStatement(n) => n.position,
            Node::WhileStatement(n) => n.position,
            Node::ForStatement(n) => n.position,
            Node::BinaryOp(n) => n.position,
            Node::RelOp(n) => n.position,
            Node::UnaryOp(n) => n.position,
            Node::NumberLiteral(n) => n.position,
            Node::StringLiteral(n) => n.position,
            Node::VariableRef(n) => n.position,
            Node::ArrayAccess(n) => n.position,
            Node::Call(n) => n.position,
            Node::RecordFieldAccess(n) => n.position,
            Node::PrimitiveType(n) => n.position,
            Node::ArrayType(n) => n.position,
            Node::Range(n) => n.position,
            Node::RecordType(n) => n.position,
            Node::RecordField(n) => n.position,
        }
    }

    /// Check if this node names a storage location or routine:
    /// an identifier, indexing, call or field access
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Node::VariableRef(_) | Node::ArrayAccess(_) | Node::Call(_) | Node::RecordFieldAccess(_)
        )
    }

    /// Direct child nodes, in source order
    pub fn children(&self) -> Vec<&Node> {
        let mut out: Vec<&Node> = Vec::new();
        match self {
            Node::Program(n) => {
                out.extend(&n.declarations);
                out.push(&n.body);
            }
            Node::TypeDeclaration(n) => out.push(&n.type_expr),
            Node::ConstDeclaration(n) => {
                out.extend(n.type_expr.as_deref());
                out.push(&n.value);
            }
            Node::VariableDeclaration(n) => {
                out.push(&n.type_expr);
                out.extend(n.init_value.as_deref());
            }
            Node::ParameterDeclaration(n) => out.push(&n.type_expr),
            Node::ProcedureDeclaration(n) => {
                out.extend(&n.params);
                out.extend(&n.declarations);
                out.push(&n.body);
            }
            Node::FunctionDeclaration(n) => {
                out.extend(&n.params);
                out.push(&n.return_type);
                out.extend(&n.declarations);
                out.push(&n.body);
            }
            Node::AssignmentStatement(n) => {
                out.push(&n.target);
                out.push(&n.value);
            }
            Node::BeginBlock(n) => out.extend(&n.statements),
            Node::IfStatement(n) => {
                out.push(&n.condition);
                out.push(&n.then_block);
                out.extend(n.else_block.as_deref());
            }
            Node::WhileStatement(n) => {
                out.push(&n.condition);
                out.push(&n.body);
            }
            Node::ForStatement(n) => {
                out.push(&n.start_expr);
                out.push(&n.end_expr);
                out.push(&n.body);
            }
            Node::BinaryOp(n) => {
                out.push(&n.left);
                out.push(&n.right);
            }
            Node::RelOp(n) => {
                out.push(&n.left);
                out.push(&n.right);
            }
            Node::UnaryOp(n) => out.push(&n.operand),
            Node::ArrayAccess(n) => {
                out.push(&n.target);
                out.extend(&n.indices);
            }
            Node::Call(n) => {
                out.push(&n.callee);
                out.extend(&n.args);
            }
            Node::RecordFieldAccess(n) => out.push(&n.record),
            Node::ArrayType(n) => {
                out.extend(&n.ranges);
                out.push(&n.element_type);
            }
            Node::Range(n) => {
                out.push(&n.low);
                out.push(&n.high);
            }
            Node::RecordType(n) => out.extend(&n.fields),
            Node::RecordField(n) => out.push(&n.type_expr),
            Node::NumberLiteral(_)
            | Node::StringLiteral(_)
            | Node::VariableRef(_)
            | Node::PrimitiveType(_) => {}
        }
        out
    }

    /// Pre-order depth-first traversal; `visit` receives each node and its
    /// depth below `self` (0 for `self`)
    pub fn walk<F: FnMut(&Node, usize)>(&self, visit: &mut F) {
        self.walk_at(0, visit);
    }

    fn walk_at<F: FnMut(&Node, usize)>(&self, depth: usize, visit: &mut F) {
        visit(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Indented diagnostic dump: one label per line, three spaces per level.
    ///
    /// Names carried by a node (declared identifiers, field names, loop
    /// variables) are printed as leaf lines one level below it.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        match self {
            Node::Program(n) => {
                line(out, depth, "program");
                if let Some(name) = &n.name {
                    line(out, depth + 1, name);
                }
                dump_all(out, depth + 1, &n.declarations);
                n.body.dump_into(out, depth + 1);
            }
            Node::TypeDeclaration(n) => {
                line(out, depth, "type");
                line(out, depth + 1, &n.name);
                n.type_expr.dump_into(out, depth + 1);
            }
            Node::ConstDeclaration(n) => {
                line(out, depth, "const");
                line(out, depth + 1, &n.name);
                if let Some(type_expr) = &n.type_expr {
                    type_expr.dump_into(out, depth + 1);
                }
                n.value.dump_into(out, depth + 1);
            }
            Node::VariableDeclaration(n) => {
                line(out, depth, "var");
                line(out, depth + 1, &n.name);
                n.type_expr.dump_into(out, depth + 1);
                if let Some(init) = &n.init_value {
                    init.dump_into(out, depth + 1);
                }
            }
            Node::ParameterDeclaration(n) => {
                line(out, depth, "param");
                if let Some(modifier) = n.modifier {
                    line(out, depth + 1, modifier.as_str());
                }
                line(out, depth + 1, &n.name);
                n.type_expr.dump_into(out, depth + 1);
            }
            Node::ProcedureDeclaration(n) => {
                line(out, depth, "procedure");
                line(out, depth + 1, &n.name);
                dump_all(out, depth + 1, &n.params);
                dump_all(out, depth + 1, &n.declarations);
                n.body.dump_into(out, depth + 1);
            }
            Node::FunctionDeclaration(n) => {
                line(out, depth, "function");
                line(out, depth + 1, &n.name);
                dump_all(out, depth + 1, &n.params);
                n.return_type.dump_into(out, depth + 1);
                dump_all(out, depth + 1, &n.declarations);
                n.body.dump_into(out, depth + 1);
            }
            Node::AssignmentStatement(n) => {
                line(out, depth, n.op.as_str());
                n.target.dump_into(out, depth + 1);
                n.value.dump_into(out, depth + 1);
            }
            Node::BeginBlock(n) => {
                line(out, depth, "begin");
                dump_all(out, depth + 1, &n.statements);
            }
            Node::IfStatement(n) => {
                line(out, depth, "if");
                n.condition.dump_into(out, depth + 1);
                n.then_block.dump_into(out, depth + 1);
                if let Some(else_block) = &n.else_block {
                    else_block.dump_into(out, depth + 1);
                }
            }
            Node::WhileStatement(n) => {
                line(out, depth, "while");
                n.condition.dump_into(out, depth + 1);
                n.body.dump_into(out, depth + 1);
            }
            Node::ForStatement(n) => {
                line(out, depth, "for");
                line(out, depth + 1, &n.var_name);
                n.start_expr.dump_into(out, depth + 1);
                line(out, depth + 1, n.direction.as_str());
                n.end_expr.dump_into(out, depth + 1);
                n.body.dump_into(out, depth + 1);
            }
            Node::BinaryOp(n) => {
                line(out, depth, n.op.as_str());
                n.left.dump_into(out, depth + 1);
                n.right.dump_into(out, depth + 1);
            }
            Node::RelOp(n) => {
                line(out, depth, n.op.as_str());
                n.left.dump_into(out, depth + 1);
                n.right.dump_into(out, depth + 1);
            }
            Node::UnaryOp(n) => {
                line(out, depth, n.op.as_str());
                n.operand.dump_into(out, depth + 1);
            }
            Node::NumberLiteral(n) => line(out, depth, &n.value.to_string()),
            Node::StringLiteral(n) => line(out, depth, &n.value),
            Node::VariableRef(n) => line(out, depth, &n.name),
            Node::ArrayAccess(n) => {
                line(out, depth, "[]");
                n.target.dump_into(out, depth + 1);
                dump_all(out, depth + 1, &n.indices);
            }
            Node::Call(n) => {
                line(out, depth, "()");
                n.callee.dump_into(out, depth + 1);
                dump_all(out, depth + 1, &n.args);
            }
            Node::RecordFieldAccess(n) => {
                line(out, depth, ".");
                n.record.dump_into(out, depth + 1);
                line(out, depth + 1, &n.field);
            }
            Node::PrimitiveType(n) => line(out, depth, &n.name),
            Node::ArrayType(n) => {
                line(out, depth, "array");
                dump_all(out, depth + 1, &n.ranges);
                n.element_type.dump_into(out, depth + 1);
            }
            Node::Range(n) => {
                line(out, depth, "..");
                n.low.dump_into(out, depth + 1);
                n.high.dump_into(out, depth + 1);
            }
            Node::RecordType(n) => {
                line(out, depth, "record");
                dump_all(out, depth + 1, &n.fields);
            }
            Node::RecordField(n) => {
                line(out, depth, "field");
                line(out, depth + 1, &n.name);
                n.type_expr.dump_into(out, depth + 1);
            }
        }
    }
}

fn line(out: &mut String, depth: usize, label: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(label);
    out.push('\n');
}

fn dump_all(out: &mut String, depth: usize, nodes: &[Node]) {
    for node in nodes {
        node.dump_into(out, depth);
    }
}
