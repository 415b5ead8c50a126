//! Parser turning script tokens into logical actions.

use std::f64::consts::PI;

use qcge_grid::{Action, ControlDirection, Direction, GateKind};

use super::error::{ScriptError, ScriptResult};
use super::lexer::{LineToken, Token, tokenize};

/// One parsed statement with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub line: usize,
    pub action: Action,
}

/// Parse a script into steps. `rotation_step` is the angle used by
/// `rotate +` and `rotate -`.
pub fn parse(source: &str, rotation_step: f64) -> ScriptResult<Vec<Step>> {
    let tokens = tokenize(source).map_err(|(line, text)| ScriptError::InvalidToken { line, text })?;

    let mut steps = Vec::new();
    for statement in tokens.split(|t| t.token == Token::Newline) {
        if let Some(first) = statement.first() {
            let mut parser = Parser {
                tokens: statement,
                pos: 0,
                line: first.line,
                rotation_step,
            };
            let action = parser.parse_statement()?;
            steps.push(Step {
                line: first.line,
                action,
            });
        }
    }
    Ok(steps)
}

struct Parser<'a> {
    tokens: &'a [LineToken],
    pos: usize,
    line: usize,
    rotation_step: f64,
}

impl Parser<'_> {
    fn parse_statement(&mut self) -> ScriptResult<Action> {
        let action = match self.advance("a statement")? {
            Token::Move => Action::MoveCursor(self.parse_direction()?),
            Token::MoveCtrl => Action::MoveControl(self.parse_control_direction()?),
            Token::Place => Action::Place(self.parse_gate()?),
            Token::Swap => Action::PlaceSwap {
                partner: self.parse_index("a partner wire")?,
            },
            Token::Ctrl => Action::AddControl,
            Token::Rotate => Action::Rotate(self.parse_rotation()?),
            Token::Delete => {
                if self.peek().is_some() {
                    let wire = self.parse_index("a wire")?;
                    let column = self.parse_index("a column")?;
                    Action::DeleteAt { wire, column }
                } else {
                    Action::Delete
                }
            }
            Token::Clear => Action::ClearAll,
            other => return Err(self.unexpected("a statement", &other)),
        };

        match self.peek() {
            None => Ok(action),
            Some(extra) => Err(self.unexpected("end of line", &extra.token)),
        }
    }

    fn parse_direction(&mut self) -> ScriptResult<Direction> {
        match self.advance("a direction")? {
            Token::Identifier(word) => match word.as_str() {
                "left" => Ok(Direction::Left),
                "right" => Ok(Direction::Right),
                "up" => Ok(Direction::Up),
                "down" => Ok(Direction::Down),
                _ => Err(self.unexpected("left, right, up or down", &Token::Identifier(word))),
            },
            other => Err(self.unexpected("a direction", &other)),
        }
    }

    fn parse_control_direction(&mut self) -> ScriptResult<ControlDirection> {
        match self.parse_direction()? {
            Direction::Up => Ok(ControlDirection::Up),
            Direction::Down => Ok(ControlDirection::Down),
            Direction::Left | Direction::Right => Err(ScriptError::Syntax {
                line: self.line,
                message: "controls only move up or down".into(),
            }),
        }
    }

    fn parse_gate(&mut self) -> ScriptResult<GateKind> {
        let token = self.advance("a gate name")?;
        let kind = match &token {
            Token::Identifier(name) => match name.as_str() {
                "x" => Some(GateKind::X),
                "y" => Some(GateKind::Y),
                "z" => Some(GateKind::Z),
                "h" => Some(GateKind::H),
                "s" => Some(GateKind::S),
                "sdg" => Some(GateKind::Sdg),
                "t" => Some(GateKind::T),
                "tdg" => Some(GateKind::Tdg),
                "i" | "id" => Some(GateKind::Identity),
                _ => None,
            },
            _ => None,
        };
        kind.ok_or_else(|| ScriptError::UnknownGate {
            line: self.line,
            name: token.to_string(),
        })
    }

    fn parse_index(&mut self, expected: &str) -> ScriptResult<usize> {
        match self.advance(expected)? {
            Token::IntLiteral(v) => usize::try_from(v).map_err(|_| ScriptError::Syntax {
                line: self.line,
                message: format!("index {v} is too large"),
            }),
            other => Err(self.unexpected(expected, &other)),
        }
    }

    /// `+`, `-`, or a signed angle: `<number>`, `pi`, `pi/<n>`, `<n>*pi`,
    /// `<n>*pi/<m>`.
    fn parse_rotation(&mut self) -> ScriptResult<f64> {
        let sign = match self.peek().map(|t| &t.token) {
            Some(Token::Plus) => {
                self.pos += 1;
                1.0
            }
            Some(Token::Minus) => {
                self.pos += 1;
                -1.0
            }
            _ => 1.0,
        };
        if self.peek().is_none() {
            return Ok(sign * self.rotation_step);
        }
        Ok(sign * self.parse_angle()?)
    }

    fn parse_angle(&mut self) -> ScriptResult<f64> {
        let mut value = match self.advance("an angle")? {
            Token::FloatLiteral(v) => v,
            #[allow(clippy::cast_precision_loss)]
            Token::IntLiteral(v) => v as f64,
            Token::Pi => PI,
            other => return Err(self.unexpected("an angle", &other)),
        };

        if self.eat(&Token::Star) {
            match self.advance("pi")? {
                Token::Pi => value *= PI,
                other => return Err(self.unexpected("pi", &other)),
            }
        }
        if self.eat(&Token::Slash) {
            let divisor = self.parse_index("a divisor")?;
            if divisor == 0 {
                return Err(ScriptError::Syntax {
                    line: self.line,
                    message: "division by zero".into(),
                });
            }
            #[allow(clippy::cast_precision_loss)]
            let divisor = divisor as f64;
            value /= divisor;
        }
        Ok(value)
    }

    fn peek(&self) -> Option<&LineToken> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().is_some_and(|t| &t.token == token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self, expected: &str) -> ScriptResult<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .map(|t| t.token.clone())
            .ok_or_else(|| ScriptError::UnexpectedEnd {
                line: self.line,
                expected: expected.to_string(),
            })?;
        self.pos += 1;
        Ok(token)
    }

    fn unexpected(&self, expected: &str, found: &Token) -> ScriptError {
        ScriptError::UnexpectedToken {
            line: self.line,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = PI / 8.0;

    fn actions(source: &str) -> Vec<Action> {
        parse(source, STEP)
            .unwrap()
            .into_iter()
            .map(|s| s.action)
            .collect()
    }

    #[test]
    fn test_every_statement() {
        let source = "\
move down
place x
ctrl
move-ctrl up
swap 2
delete
delete 1 3
rotate +
rotate -
clear
";
        assert_eq!(
            actions(source),
            vec![
                Action::MoveCursor(Direction::Down),
                Action::Place(GateKind::X),
                Action::AddControl,
                Action::MoveControl(ControlDirection::Up),
                Action::PlaceSwap { partner: 2 },
                Action::Delete,
                Action::DeleteAt { wire: 1, column: 3 },
                Action::Rotate(STEP),
                Action::Rotate(-STEP),
                Action::ClearAll,
            ]
        );
    }

    #[test]
    fn test_rotation_literals() {
        assert_eq!(
            actions("rotate pi\nrotate -pi/2\nrotate 3*pi/4\nrotate 0.25\nrotate 1"),
            vec![
                Action::Rotate(PI),
                Action::Rotate(-PI / 2.0),
                Action::Rotate(3.0 * PI / 4.0),
                Action::Rotate(0.25),
                Action::Rotate(1.0),
            ]
        );
    }

    #[test]
    fn test_gate_names() {
        assert_eq!(
            actions("place SDG\nplace i\nplace tdg"),
            vec![
                Action::Place(GateKind::Sdg),
                Action::Place(GateKind::Identity),
                Action::Place(GateKind::Tdg),
            ]
        );
    }

    #[test]
    fn test_line_numbers_skip_blank_and_comment_lines() {
        let steps = parse("# setup\n\nplace h\n  # again\nctrl\n", STEP).unwrap();
        let lines: Vec<_> = steps.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn test_unknown_gate() {
        assert_eq!(
            parse("place h\nplace ctrl_line", STEP),
            Err(ScriptError::UnknownGate {
                line: 2,
                name: "ctrl_line".into()
            })
        );
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        assert!(matches!(
            parse("clear now", STEP),
            Err(ScriptError::UnexpectedToken { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_argument() {
        assert!(matches!(
            parse("\nswap", STEP),
            Err(ScriptError::UnexpectedEnd { line: 2, .. })
        ));
        assert!(matches!(
            parse("delete 1", STEP),
            Err(ScriptError::UnexpectedEnd { line: 1, .. })
        ));
    }

    #[test]
    fn test_sideways_control_move() {
        assert!(matches!(
            parse("move-ctrl left", STEP),
            Err(ScriptError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(parse("rotate pi/0", STEP).is_err());
    }
}
