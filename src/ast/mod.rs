/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root, the statement and expression enums, rendering
/// - expressions: Definitions for the expression node kinds and operators
/// - statements: Definitions for the statement node kinds
pub mod ast;
pub mod expressions;
pub mod statements;
