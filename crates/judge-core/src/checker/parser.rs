//! Recursive-descent parser for the checker language.
//!
//! Operator precedence is handled by precedence-climbing (`or` < `and` <
//! `not` < comparisons < `+`/`-` < `*`/`/`/`%` < unary < postfix).

use crate::checker::ast::{BinaryOp, DefStmt, Expr, IfStmt, LetStmt, Program, Stmt, UnaryOp};
use crate::checker::lexer::{Span, Spanned, Token};
use crate::checker::value::Value;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected {expected}, found {found:?}")]
    Unexpected {
        line: usize,
        expected: &'static str,
        found: Token,
    },

    #[error("unexpected end of input")]
    UnexpectedEof,
}

pub fn parse(tokens: Vec<Spanned>) -> Result<Program, ParseError> {
    let mut parser = Parser { tokens, pos: 0 };
    parser.skip_newlines();
    let mut stmts = Vec::new();
    while !parser.at(&Token::Eof) {
        stmts.push(parser.statement()?);
        parser.skip_newlines();
    }
    Ok(Program { stmts })
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Spanned {
        &self.tokens[self.pos]
    }

    fn line(&self) -> usize {
        self.peek().span.line
    }

    fn at(&self, token: &Token) -> bool {
        &self.peek().token == token
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<(), ParseError> {
        if self.peek().token == token {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::Unexpected {
                line: self.line(),
                expected,
                found: self.peek().token.clone(),
            })
        }
    }

    fn skip_newlines(&mut self) {
        while self.at(&Token::Newline) {
            self.advance();
        }
    }

    fn ident(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Token::Ident(name) => Ok(name),
            other => Err(ParseError::Unexpected {
                line: self.line(),
                expected: "identifier",
                found: other,
            }),
        }
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        match &self.peek().token {
            Token::Def => self.def_stmt().map(Stmt::Def),
            Token::If => self.if_stmt().map(Stmt::If),
            Token::Return => {
                self.advance();
                let expr = self.expr()?;
                Ok(Stmt::Return(expr))
            }
            Token::Ident(_) if self.is_assignment() => self.let_stmt().map(Stmt::Let),
            _ => {
                let expr = self.expr()?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn is_assignment(&self) -> bool {
        matches!(
            self.tokens.get(self.pos + 1).map(|s| &s.token),
            Some(Token::Assign)
        )
    }

    fn def_stmt(&mut self) -> Result<DefStmt, ParseError> {
        self.expect(Token::Def, "def")?;
        let name = self.ident()?;
        self.expect(Token::LParen, "(")?;

        let mut params = Vec::new();
        if !self.at(&Token::RParen) {
            params.push(self.ident()?);
            while self.at(&Token::Comma) {
                self.advance();
                params.push(self.ident()?);
            }
        }
        self.expect(Token::RParen, ")")?;

        if self.at(&Token::Arrow) {
            self.advance();
            self.ident()?;
        }

        self.expect(Token::Colon, ":")?;
        let body = self.block()?;

        Ok(DefStmt { name, params, body })
    }

    fn if_stmt(&mut self) -> Result<IfStmt, ParseError> {
        self.expect(Token::If, "if")?;
        let cond = self.expr()?;
        self.expect(Token::Colon, ":")?;
        let then_block = self.block()?;

        let else_block = if self.peek_over_newlines_is(&Token::Else) {
            self.skip_newlines();
            self.expect(Token::Else, "else")?;
            self.expect(Token::Colon, ":")?;
            Some(self.block()?)
        } else {
            None
        };

        Ok(IfStmt {
            cond,
            then_block,
            else_block,
        })
    }

    fn peek_over_newlines_is(&self, token: &Token) -> bool {
        let mut i = self.pos;
        while let Some(spanned) = self.tokens.get(i) {
            if spanned.token == Token::Newline {
                i += 1;
                continue;
            }
            return &spanned.token == token;
        }
        false
    }

    fn let_stmt(&mut self) -> Result<LetStmt, ParseError> {
        let name = self.ident()?;
        self.expect(Token::Assign, "=")?;
        let value = self.expr()?;
        Ok(LetStmt { name, value })
    }

    fn block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.skip_newlines();
        self.expect(Token::Indent, "indented block")?;
        self.skip_newlines();

        let mut stmts = Vec::new();
        while !self.at(&Token::Dedent) && !self.at(&Token::Eof) {
            stmts.push(self.statement()?);
            self.skip_newlines();
        }
        self.expect(Token::Dedent, "end of block")?;

        Ok(stmts)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.and_expr()?;
        while self.at(&Token::Or) {
            self.advance();
            let rhs = self.and_expr()?;
            lhs = Expr::Binary(BinaryOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.not_expr()?;
        while self.at(&Token::And) {
            self.advance();
            let rhs = self.not_expr()?;
            lhs = Expr::Binary(BinaryOp::And, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Expr, ParseError> {
        if self.at(&Token::Not) {
            self.advance();
            let inner = self.not_expr()?;
            Ok(Expr::Unary(UnaryOp::Not, Box::new(inner)))
        } else {
            self.cmp_expr()
        }
    }

    fn cmp_expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.add_expr()?;
        let op = match self.peek().token {
            Token::EqEq => BinaryOp::Eq,
            Token::NotEq => BinaryOp::Ne,
            Token::Lt => BinaryOp::Lt,
            Token::Le => BinaryOp::Le,
            Token::Gt => BinaryOp::Gt,
            Token::Ge => BinaryOp::Ge,
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.add_expr()?;
        Ok(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))
    }

    fn add_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.mul_expr()?;
        loop {
            let op = match self.peek().token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.mul_expr()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn mul_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().token {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.at(&Token::Minus) {
            self.advance();
            let inner = self.unary()?;
            Ok(Expr::Unary(UnaryOp::Neg, Box::new(inner)))
        } else {
            self.postfix()
        }
    }

    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;

        loop {
            match &self.peek().token {
                Token::LParen => {
                    let args = self.call_args()?;
                    let callee = match expr {
                        Expr::Ident(name) => name,
                        _ => {
                            return Err(ParseError::Unexpected {
                                line: self.line(),
                                expected: "callable name",
                                found: self.peek().token.clone(),
                            })
                        }
                    };
                    expr = Expr::Call { callee, args };
                }
                Token::Dot => {
                    self.advance();
                    let method = self.ident()?;
                    let args = if self.at(&Token::LParen) {
                        self.call_args()?
                    } else {
                        Vec::new()
                    };
                    expr = Expr::MethodCall {
                        receiver: Box::new(expr),
                        method,
                        args,
                    };
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(Token::LParen, "(")?;
        let mut args = Vec::new();
        if !self.at(&Token::RParen) {
            args.push(self.expr()?);
            while self.at(&Token::Comma) {
                self.advance();
                args.push(self.expr()?);
            }
        }
        self.expect(Token::RParen, ")")?;
        Ok(args)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Token::Int(i) => Ok(Expr::Literal(Value::Int(i))),
            Token::Float(f) => Ok(Expr::Literal(Value::Float(f))),
            Token::Str(s) => Ok(Expr::Literal(Value::Str(s))),
            Token::True => Ok(Expr::Literal(Value::Bool(true))),
            Token::False => Ok(Expr::Literal(Value::Bool(false))),
            Token::None_ => Ok(Expr::Literal(Value::None)),
            Token::Ident(name) => Ok(Expr::Ident(name)),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(Token::RParen, ")")?;
                Ok(inner)
            }
            other => Err(ParseError::Unexpected {
                line: self.line(),
                expected: "expression",
                found: other,
            }),
        }
    }
}

#[allow(dead_code)]
fn span_of(spanned: &Spanned) -> Span {
    spanned.span
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::lexer::lex;

    fn parse_src(src: &str) -> Program {
        parse(lex(src).unwrap()).unwrap()
    }

    #[test]
    fn parses_simple_checker() {
        let program = parse_src("def checker(right_value, value) -> bool:\n    return right_value == value\n");
        assert_eq!(program.stmts.len(), 1);
        match &program.stmts[0] {
            Stmt::Def(def) => {
                assert_eq!(def.name, "checker");
                assert_eq!(def.params, vec!["right_value", "value"]);
                assert_eq!(def.body.len(), 1);
            }
            other => panic!("expected def, got {other:?}"),
        }
    }

    #[test]
    fn parses_if_else() {
        let program = parse_src(
            "def checker(r, v) -> bool:\n    if r == v:\n        return True\n    else:\n        return False\n",
        );
        let Stmt::Def(def) = &program.stmts[0] else {
            panic!("expected def")
        };
        assert_eq!(def.body.len(), 1);
        assert!(matches!(def.body[0], Stmt::If(_)));
    }

    #[test]
    fn parses_method_and_builtin_calls() {
        let program = parse_src(
            "def checker(r, v) -> bool:\n    x = round(float(v.strip()), 2)\n    return x == r\n",
        );
        let Stmt::Def(def) = &program.stmts[0] else {
            panic!("expected def")
        };
        assert_eq!(def.body.len(), 2);
        assert!(matches!(def.body[0], Stmt::Let(_)));
    }
}
