//! Test fixtures standing in for the host parser
//!
//! A small owned expression tree plus an explicit source map, enough to
//! drive every component without a real parser. Construction mirrors how a
//! host would surface its nodes: kinds, operator kinds, literal values, and
//! the dependence/evaluability predicates are all set directly.

use crate::source::{BufferId, SourceMap, SourcePos, SourceRange};
use crate::tree::{BinaryOp, Expr, ExprKind, Stmt, StmtKind, UnaryOp};
use std::collections::HashMap;

/// Owned expression node implementing [`Expr`]
pub(crate) struct TestExpr {
    kind: ExprKind,
    children: Vec<TestExpr>,
    bool_value: Option<bool>,
    int_value: Option<i128>,
    string_value: Option<String>,
    unary_op: Option<UnaryOp>,
    binary_op: Option<BinaryOp>,
    cast_is_pointer: bool,
    callee: Option<String>,
    callee_const: bool,
    value_dependent: bool,
    type_dependent: bool,
    instantiation_dependent: bool,
    evaluable: bool,
    position: SourcePos,
    range: SourceRange,
    operator_range: Option<SourceRange>,
}

impl TestExpr {
    fn node(kind: ExprKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            bool_value: None,
            int_value: None,
            string_value: None,
            unary_op: None,
            binary_op: None,
            cast_is_pointer: false,
            callee: None,
            callee_const: false,
            value_dependent: false,
            type_dependent: false,
            instantiation_dependent: false,
            evaluable: true,
            position: SourcePos::new(BufferId(0), 0),
            range: SourceRange::new(BufferId(0), 0, 0),
            operator_range: None,
        }
    }

    pub fn bool_lit(value: bool) -> Self {
        let mut expr = Self::node(ExprKind::BoolLiteral);
        expr.bool_value = Some(value);
        expr
    }

    pub fn int_lit(value: i128) -> Self {
        let mut expr = Self::node(ExprKind::IntLiteral);
        expr.int_value = Some(value);
        expr
    }

    pub fn null_lit() -> Self {
        Self::node(ExprKind::NullLiteral)
    }

    pub fn string_lit(value: &str) -> Self {
        let mut expr = Self::node(ExprKind::StringLiteral);
        expr.string_value = Some(value.to_string());
        expr
    }

    /// An expression the rule has no interest in
    pub fn other() -> Self {
        Self::node(ExprKind::Other)
    }

    pub fn not(operand: TestExpr) -> Self {
        let mut expr = Self::node(ExprKind::Unary);
        expr.unary_op = Some(UnaryOp::Not);
        expr.children = vec![operand];
        expr
    }

    pub fn paren(inner: TestExpr) -> Self {
        let mut expr = Self::node(ExprKind::Paren);
        expr.children = vec![inner];
        expr
    }

    pub fn implicit_cast(inner: TestExpr) -> Self {
        let mut expr = Self::node(ExprKind::ImplicitCast);
        expr.children = vec![inner];
        expr
    }

    /// Explicit C-style cast to a non-pointer type
    pub fn cast(inner: TestExpr) -> Self {
        let mut expr = Self::node(ExprKind::Cast);
        expr.children = vec![inner];
        expr
    }

    /// Explicit C-style cast to a pointer type
    pub fn pointer_cast(inner: TestExpr) -> Self {
        let mut expr = Self::cast(inner);
        expr.cast_is_pointer = true;
        expr
    }

    fn binary(op: BinaryOp, lhs: TestExpr, rhs: TestExpr) -> Self {
        let mut expr = Self::node(ExprKind::Binary);
        expr.binary_op = Some(op);
        expr.children = vec![lhs, rhs];
        expr
    }

    pub fn and(lhs: TestExpr, rhs: TestExpr) -> Self {
        Self::binary(BinaryOp::LogicalAnd, lhs, rhs)
    }

    pub fn eq(lhs: TestExpr, rhs: TestExpr) -> Self {
        Self::binary(BinaryOp::Equal, lhs, rhs)
    }

    pub fn binary_other(lhs: TestExpr, rhs: TestExpr) -> Self {
        Self::binary(BinaryOp::Other, lhs, rhs)
    }

    pub fn call(callee: &str, args: Vec<TestExpr>) -> Self {
        let mut expr = Self::node(ExprKind::Call);
        expr.callee = Some(callee.to_string());
        expr.children = args;
        expr
    }

    /// Mark a call's callee as guaranteed compile-time evaluable
    pub fn const_evaluable(mut self) -> Self {
        self.callee_const = true;
        self
    }

    pub fn not_evaluable(mut self) -> Self {
        self.evaluable = false;
        self
    }

    pub fn value_dependent(mut self) -> Self {
        self.value_dependent = true;
        self
    }

    pub fn type_dependent(mut self) -> Self {
        self.type_dependent = true;
        self
    }

    pub fn instantiation_dependent(mut self) -> Self {
        self.instantiation_dependent = true;
        self
    }

    /// Set the spelling range edits would target
    pub fn spelled(mut self, range: SourceRange) -> Self {
        self.range = range;
        self
    }

    /// Set the expansion position used by the origin checks
    pub fn positioned(mut self, position: SourcePos) -> Self {
        self.position = position;
        self
    }

    pub fn with_operator_range(mut self, range: SourceRange) -> Self {
        self.operator_range = Some(range);
        self
    }
}

impl Expr for TestExpr {
    fn kind(&self) -> ExprKind {
        self.kind
    }

    fn operands(&self) -> Vec<&dyn Expr> {
        self.children.iter().map(|child| child as &dyn Expr).collect()
    }

    fn bool_value(&self) -> Option<bool> {
        self.bool_value
    }

    fn int_value(&self) -> Option<i128> {
        self.int_value
    }

    fn string_value(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    fn unary_op(&self) -> Option<UnaryOp> {
        self.unary_op
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        self.binary_op
    }

    fn cast_is_pointer(&self) -> bool {
        self.cast_is_pointer
    }

    fn callee_name(&self) -> Option<&str> {
        self.callee.as_deref()
    }

    fn callee_is_const_evaluable(&self) -> bool {
        self.callee_const
    }

    fn is_value_dependent(&self) -> bool {
        self.value_dependent
    }

    fn is_type_dependent(&self) -> bool {
        self.type_dependent
    }

    fn is_instantiation_dependent(&self) -> bool {
        self.instantiation_dependent
    }

    fn is_compile_time_evaluable(&self) -> bool {
        self.evaluable
    }

    fn position(&self) -> SourcePos {
        self.position
    }

    fn range(&self) -> SourceRange {
        self.range
    }

    fn operator_range(&self) -> Option<SourceRange> {
        self.operator_range
    }
}

/// Owned candidate statement implementing [`Stmt`]
pub(crate) struct TestStmt {
    kind: StmtKind,
    condition: TestExpr,
    begin: SourcePos,
    in_template: bool,
}

impl TestStmt {
    pub fn if_stmt(condition: TestExpr, begin: SourcePos) -> Self {
        Self {
            kind: StmtKind::If,
            condition,
            begin,
            in_template: false,
        }
    }

    pub fn conditional(condition: TestExpr, begin: SourcePos) -> Self {
        Self {
            kind: StmtKind::Conditional,
            condition,
            begin,
            in_template: false,
        }
    }

    pub fn in_template(mut self) -> Self {
        self.in_template = true;
        self
    }
}

impl Stmt for TestStmt {
    fn kind(&self) -> StmtKind {
        self.kind
    }

    fn condition(&self) -> &dyn Expr {
        &self.condition
    }

    fn begin(&self) -> SourcePos {
        self.begin
    }

    fn in_template_instantiation(&self) -> bool {
        self.in_template
    }
}

/// Explicit source map: buffers, expansion records, and spelling links are
/// registered one by one.
#[derive(Default)]
pub(crate) struct TestSourceMap {
    buffers: HashMap<BufferId, String>,
    expansions: HashMap<SourcePos, (String, Option<SourcePos>)>,
    spellings: HashMap<SourcePos, SourcePos>,
}

impl TestSourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(mut self, id: BufferId, text: &str) -> Self {
        self.buffers.insert(id, text.to_string());
        self
    }

    /// Register `pos` as the expansion of macro `name` invoked at `caller`
    pub fn expansion(mut self, pos: SourcePos, name: &str, caller: SourcePos) -> Self {
        self.expansions.insert(pos, (name.to_string(), Some(caller)));
        self
    }

    /// Expansion record with a broken caller link
    pub fn expansion_without_caller(mut self, pos: SourcePos, name: &str) -> Self {
        self.expansions.insert(pos, (name.to_string(), None));
        self
    }

    /// Register where the token at `pos` was literally spelled
    pub fn spelling(mut self, pos: SourcePos, spelled_at: SourcePos) -> Self {
        self.spellings.insert(pos, spelled_at);
        self
    }
}

impl SourceMap for TestSourceMap {
    fn is_macro_position(&self, pos: SourcePos) -> bool {
        self.expansions.contains_key(&pos)
    }

    fn immediate_macro_name(&self, pos: SourcePos) -> Option<&str> {
        self.expansions.get(&pos).map(|(name, _)| name.as_str())
    }

    fn immediate_caller(&self, pos: SourcePos) -> Option<SourcePos> {
        self.expansions.get(&pos).and_then(|(_, caller)| *caller)
    }

    fn immediate_spelling(&self, pos: SourcePos) -> Option<SourcePos> {
        Some(self.spellings.get(&pos).copied().unwrap_or(pos))
    }

    fn buffer_text(&self, buffer: BufferId) -> Option<&str> {
        self.buffers.get(&buffer).map(String::as_str)
    }
}
