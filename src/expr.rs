//! Symbolic breakpoint expressions.
//!
//! Template times are linear combinations of the tokens `start`, `end`,
//! `occ`, `vac` plus a numeric offset, held as explicit terms and summed at
//! evaluation time. The textual form the host hands over ("start - 2",
//! "end + vac * 0.35") is parsed into the same structure up front; nothing is
//! ever substituted into text or executed dynamically.

use crate::error::ExprError;
use crate::hours::DayHours;
use serde::{Deserialize, Serialize};

/// Symbolic time token of a template expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeToken {
    /// Occupied start hour of the day-type.
    Start,
    /// Occupied end hour of the day-type.
    End,
    /// Occupied hours (wrap-aware).
    Occ,
    /// Vacant hours (24 minus occupied).
    Vac,
}

impl TimeToken {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            "occ" => Some(Self::Occ),
            "vac" => Some(Self::Vac),
            _ => None,
        }
    }
}

/// Numeric values the tokens resolve to for one day-type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenContext {
    pub start: f64,
    pub end: f64,
    pub occ: f64,
    pub vac: f64,
}

impl TokenContext {
    /// Derives token values from a day-type's operating window.
    pub fn for_day(hours: DayHours) -> Self {
        let occ = hours.occupied_hours();
        Self {
            start: hours.start,
            end: hours.end,
            occ,
            vac: 24.0 - occ,
        }
    }

    fn value(&self, token: TimeToken) -> f64 {
        match token {
            TimeToken::Start => self.start,
            TimeToken::End => self.end,
            TimeToken::Occ => self.occ,
            TimeToken::Vac => self.vac,
        }
    }
}

/// One `coefficient * token` term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeTerm {
    pub token: TimeToken,
    pub coeff: f64,
}

/// A breakpoint time as a linear expression over the time tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeExpr {
    pub terms: Vec<TimeTerm>,
    pub offset: f64,
}

impl TimeExpr {
    /// A plain numeric time with no tokens.
    pub fn constant(offset: f64) -> Self {
        Self {
            terms: Vec::new(),
            offset,
        }
    }

    /// A single token with coefficient 1.
    pub fn token(token: TimeToken) -> Self {
        Self::scaled(token, 1.0)
    }

    /// A single scaled token.
    pub fn scaled(token: TimeToken, coeff: f64) -> Self {
        Self {
            terms: vec![TimeTerm { token, coeff }],
            offset: 0.0,
        }
    }

    /// Adds a numeric offset.
    pub fn plus(mut self, offset: f64) -> Self {
        self.offset += offset;
        self
    }

    /// Subtracts a numeric offset.
    pub fn minus(self, offset: f64) -> Self {
        self.plus(-offset)
    }

    /// Adds a scaled token term.
    pub fn plus_scaled(mut self, token: TimeToken, coeff: f64) -> Self {
        self.terms.push(TimeTerm { token, coeff });
        self
    }

    /// Evaluates the expression against one day-type's token values.
    pub fn resolve(&self, ctx: &TokenContext) -> f64 {
        self.terms
            .iter()
            .fold(self.offset, |acc, term| acc + term.coeff * ctx.value(term.token))
    }

    /// Parses the textual expression form.
    ///
    /// Grammar: terms joined by `+`/`-`, each term a product of numbers and
    /// at most one token (`start`, `end`, `occ`, `vac`). A product of two
    /// tokens is rejected as non-linear.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        let lexemes = lex(text)?;
        if lexemes.is_empty() {
            return Err(ExprError::Malformed {
                fragment: text.to_string(),
            });
        }

        let mut expr = TimeExpr::default();
        let mut i = 0;
        let mut sign = 1.0;
        if lexemes[0] == Lexeme::Minus {
            sign = -1.0;
            i = 1;
        }

        loop {
            let (coeff, token, next) = parse_term(&lexemes, i, text)?;
            match token {
                Some(tok) => expr.terms.push(TimeTerm {
                    token: tok,
                    coeff: sign * coeff,
                }),
                None => expr.offset += sign * coeff,
            }
            i = next;
            if i == lexemes.len() {
                break;
            }
            sign = match lexemes[i] {
                Lexeme::Plus => 1.0,
                Lexeme::Minus => -1.0,
                _ => {
                    return Err(ExprError::Malformed {
                        fragment: text.to_string(),
                    });
                }
            };
            i += 1;
        }
        Ok(expr)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
}

fn lex(text: &str) -> Result<Vec<Lexeme>, ExprError> {
    let mut out = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || c == '.' {
            let from = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let fragment: String = chars[from..i].iter().collect();
            let num = fragment.parse::<f64>().map_err(|_| ExprError::Malformed {
                fragment: fragment.clone(),
            })?;
            out.push(Lexeme::Num(num));
        } else if c.is_ascii_alphabetic() {
            let from = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Lexeme::Ident(chars[from..i].iter().collect()));
        } else {
            match c {
                '+' => out.push(Lexeme::Plus),
                '-' => out.push(Lexeme::Minus),
                '*' => out.push(Lexeme::Star),
                _ => {
                    return Err(ExprError::Malformed {
                        fragment: c.to_string(),
                    });
                }
            }
            i += 1;
        }
    }
    Ok(out)
}

/// Parses one product of factors starting at `i`.
///
/// Returns the numeric coefficient, the token if one appeared, and the index
/// after the term.
fn parse_term(
    lexemes: &[Lexeme],
    mut i: usize,
    text: &str,
) -> Result<(f64, Option<TimeToken>, usize), ExprError> {
    let mut coeff = 1.0;
    let mut token = None;
    loop {
        match lexemes.get(i) {
            Some(Lexeme::Num(n)) => coeff *= n,
            Some(Lexeme::Ident(name)) => {
                let tok = TimeToken::from_name(name).ok_or_else(|| ExprError::UnknownToken {
                    fragment: name.clone(),
                })?;
                if token.is_some() {
                    return Err(ExprError::NonLinear {
                        fragment: name.clone(),
                    });
                }
                token = Some(tok);
            }
            _ => {
                return Err(ExprError::Malformed {
                    fragment: text.to_string(),
                });
            }
        }
        i += 1;
        if lexemes.get(i) == Some(&Lexeme::Star) {
            i += 1;
        } else {
            break;
        }
    }
    Ok((coeff, token, i))
}

/// A breakpoint value: a plain number or one of the caller-substituted value
/// tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ValueExpr {
    Const(f64),
    /// Lower substituted level, e.g. a setback temperature.
    Floor,
    /// Upper substituted level, e.g. an occupied setpoint.
    Ceiling,
}

impl ValueExpr {
    /// Parses the textual value form: `floor`, `ceiling`, or a number.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        match text.trim() {
            "floor" => Ok(Self::Floor),
            "ceiling" => Ok(Self::Ceiling),
            other => other.parse::<f64>().map(Self::Const).map_err(|_| {
                ExprError::UnknownToken {
                    fragment: other.to_string(),
                }
            }),
        }
    }

    /// Resolves against the caller substitutions; `None` when the needed
    /// substitution is missing.
    pub fn resolve(&self, subs: &ValueSubstitutions) -> Option<f64> {
        match self {
            Self::Const(v) => Some(*v),
            Self::Floor => subs.floor,
            Self::Ceiling => subs.ceiling,
        }
    }

    /// Token name for error reporting; `None` for constants.
    pub fn token_name(&self) -> Option<&'static str> {
        match self {
            Self::Const(_) => None,
            Self::Floor => Some("floor"),
            Self::Ceiling => Some("ceiling"),
        }
    }
}

/// Caller-provided numeric substitutions for the value tokens, already in the
/// simulation engine's working unit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueSubstitutions {
    pub floor: Option<f64>,
    pub ceiling: Option<f64>,
}

impl ValueSubstitutions {
    /// No substitutions; templates with value tokens will fail to evaluate.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(floor: f64, ceiling: f64) -> Self {
        Self {
            floor: Some(floor),
            ceiling: Some(ceiling),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office_ctx() -> TokenContext {
        TokenContext::for_day(DayHours::new(9.0, 17.0))
    }

    #[test]
    fn test_context_for_day() {
        let ctx = office_ctx();
        assert!((ctx.occ - 8.0).abs() < 1e-12);
        assert!((ctx.vac - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_context_overnight() {
        let ctx = TokenContext::for_day(DayHours::new(22.0, 6.0));
        assert!((ctx.occ - 8.0).abs() < 1e-12, "occ wraps past midnight");
        assert!((ctx.vac - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_builder_resolve() {
        let ctx = office_ctx();
        let expr = TimeExpr::token(TimeToken::Start).minus(2.0);
        assert!((expr.resolve(&ctx) - 7.0).abs() < 1e-12);

        let expr = TimeExpr::token(TimeToken::End).plus_scaled(TimeToken::Vac, 0.35);
        assert!((expr.resolve(&ctx) - (17.0 + 0.35 * 16.0)).abs() < 1e-12);
    }

    #[test]
    fn test_parse_simple_offsets() {
        let ctx = office_ctx();
        assert!((TimeExpr::parse("start - 2").unwrap().resolve(&ctx) - 7.0).abs() < 1e-12);
        assert!((TimeExpr::parse("start-2").unwrap().resolve(&ctx) - 7.0).abs() < 1e-12);
        assert!((TimeExpr::parse("2 + 3").unwrap().resolve(&ctx) - 5.0).abs() < 1e-12);
        assert!((TimeExpr::parse("0").unwrap().resolve(&ctx) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_scaled_tokens() {
        let ctx = office_ctx();
        let expr = TimeExpr::parse("end + vac * 0.35").unwrap();
        assert!((expr.resolve(&ctx) - 22.6).abs() < 1e-12);

        let expr = TimeExpr::parse("occ * 0.5 + start").unwrap();
        assert!((expr.resolve(&ctx) - 13.0).abs() < 1e-12);

        // Coefficient order does not matter.
        let expr = TimeExpr::parse("0.5 * occ + start").unwrap();
        assert!((expr.resolve(&ctx) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_leading_minus() {
        let ctx = office_ctx();
        let expr = TimeExpr::parse("-2 + start").unwrap();
        assert!((expr.resolve(&ctx) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_unknown_token() {
        let err = TimeExpr::parse("stort - 2").unwrap_err();
        assert_eq!(
            err,
            ExprError::UnknownToken {
                fragment: "stort".to_string()
            }
        );
    }

    #[test]
    fn test_parse_non_linear_product() {
        let err = TimeExpr::parse("start * end").unwrap_err();
        assert!(matches!(err, ExprError::NonLinear { .. }));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            TimeExpr::parse("start +"),
            Err(ExprError::Malformed { .. })
        ));
        assert!(matches!(
            TimeExpr::parse(""),
            Err(ExprError::Malformed { .. })
        ));
        assert!(matches!(
            TimeExpr::parse("start ("),
            Err(ExprError::Malformed { .. })
        ));
        assert!(matches!(
            TimeExpr::parse("1.2.3"),
            Err(ExprError::Malformed { .. })
        ));
    }

    #[test]
    fn test_value_expr_parse_and_resolve() {
        let subs = ValueSubstitutions::new(15.6, 21.1);
        assert_eq!(ValueExpr::parse("floor").unwrap().resolve(&subs), Some(15.6));
        assert_eq!(
            ValueExpr::parse("ceiling").unwrap().resolve(&subs),
            Some(21.1)
        );
        assert_eq!(
            ValueExpr::parse("0.75").unwrap().resolve(&ValueSubstitutions::none()),
            Some(0.75)
        );
        assert!(ValueExpr::parse("roof").is_err());
    }

    #[test]
    fn test_value_expr_missing_substitution() {
        assert_eq!(ValueExpr::Floor.resolve(&ValueSubstitutions::none()), None);
        assert_eq!(ValueExpr::Floor.token_name(), Some("floor"));
        assert_eq!(ValueExpr::Const(1.0).token_name(), None);
    }
}
