// Conversão de valores vindos do cliente (query string / JSON sem tipo)
// para os tipos do documento User.

use crate::utils::error::AppError;
use serde_json::Value;

/// 2^53 - 1, maior inteiro representável sem perda por clientes JS
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converte uma string como `Number()` do JavaScript.
///
/// Retorna `None` quando o resultado seria `NaN`.
pub fn js_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() {
                return None;
            }
            return digits.chars().try_fold(0f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
            });
        }
    }

    let (sign, body) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    if body == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    // Corpo precisa começar por dígito ou ponto; bloqueia "inf", "nan", "+-5"
    match body.as_bytes().first() {
        Some(b) if b.is_ascii_digit() || *b == b'.' => {}
        _ => return None,
    }
    if !body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }

    body.parse::<f64>().ok().map(|v| sign * v)
}

/// Inteiro exato dentro da faixa segura, ou `None`.
pub fn safe_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}

/// userID vindo da query em endpoints que exigem formato numérico.
///
/// `NaN` vira `InvalidArgument`; um número válido que não é inteiro seguro
/// não corresponde a nenhum usuário e retorna `Ok(None)`.
pub fn numeric_query_id(raw: Option<&str>) -> Result<Option<i64>, AppError> {
    let number = raw.and_then(js_number).ok_or_else(AppError::invalid_user_id)?;
    Ok(safe_integer(number))
}

/// userID da query comparado com a semântica permissiva do banco.
///
/// Só falha (cast) quando o valor não é número; vazio, fracionário ou
/// fora da faixa segura simplesmente não corresponde a nenhum usuário.
pub fn loose_query_id(raw: Option<&str>) -> Result<Option<i64>, AppError> {
    let s = match raw {
        Some(s) => s,
        None => return Err(cast_error("Number", None, "userID")),
    };
    if s.trim().is_empty() {
        return Ok(None);
    }

    let number = js_number(s)
        .ok_or_else(|| cast_error("Number", Some(&Value::String(s.to_string())), "userID"))?;
    Ok(safe_integer(number))
}

fn describe(value: Option<&Value>) -> (String, &'static str) {
    match value {
        None => ("undefined".to_string(), "undefined"),
        Some(Value::Null) => ("null".to_string(), "null"),
        Some(Value::String(s)) => (s.clone(), "string"),
        Some(Value::Number(n)) => (n.to_string(), "number"),
        Some(Value::Bool(b)) => (b.to_string(), "boolean"),
        Some(Value::Array(_)) => ("[...]".to_string(), "Array"),
        Some(Value::Object(_)) => ("{...}".to_string(), "Object"),
    }
}

fn cast_error(kind: &str, value: Option<&Value>, path: &str) -> AppError {
    let (shown, type_name) = describe(value);
    AppError::Internal(format!(
        "Cast to {} failed for value \"{}\" (type {}) at path \"{}\" for model \"User\"",
        kind, shown, type_name, path
    ))
}

/// Cast numérico permissivo aplicado a campos inteiros do User.
pub fn cast_integer(value: Option<&Value>, path: &str) -> Result<i64, AppError> {
    let number = match value {
        Some(Value::Number(n)) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Some(Value::String(s)) if !s.trim().is_empty() => js_number(s),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    number
        .and_then(safe_integer)
        .ok_or_else(|| cast_error("Number", value, path))
}

/// Igual a `cast_integer`, mas ausência/null significa "não alterar":
/// o contador é sempre inteiro, então `null` não é gravado.
pub fn cast_optional_integer(value: Option<&Value>, path: &str) -> Result<Option<i64>, AppError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(_) => cast_integer(value, path).map(Some),
    }
}

pub fn cast_string(value: Option<&Value>, path: &str) -> Result<String, AppError> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        _ => Err(cast_error("string", value, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_js_number_matches_javascript() {
        assert_eq!(js_number("42"), Some(42.0));
        assert_eq!(js_number("  7 "), Some(7.0));
        assert_eq!(js_number(""), Some(0.0));
        assert_eq!(js_number("0x1F"), Some(31.0));
        assert_eq!(js_number("0b101"), Some(5.0));
        assert_eq!(js_number("1e3"), Some(1000.0));
        assert_eq!(js_number("-2.5"), Some(-2.5));
        assert_eq!(js_number(".5"), Some(0.5));
        assert_eq!(js_number("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_js_number_nan_cases() {
        for raw in ["abc", "12abc", "inf", "NaN", "+-5", "0x", "0x+5", "1e", ".", "infinity"] {
            assert_eq!(js_number(raw), None, "{raw:?} should be NaN");
        }
    }

    #[test]
    fn test_numeric_query_id() {
        assert_eq!(numeric_query_id(Some("5")), Ok(Some(5)));
        assert_eq!(numeric_query_id(Some("5.5")), Ok(None));
        assert_eq!(numeric_query_id(Some("abc")), Err(AppError::invalid_user_id()));
        assert_eq!(numeric_query_id(None), Err(AppError::invalid_user_id()));
    }

    #[test]
    fn test_loose_query_id() {
        assert_eq!(loose_query_id(Some("5")), Ok(Some(5)));
        for raw in ["1.5", "", "  ", "1e20", "Infinity"] {
            assert_eq!(loose_query_id(Some(raw)), Ok(None), "{raw:?}");
        }
        assert!(matches!(loose_query_id(Some("abc")), Err(AppError::Internal(_))));
        assert!(matches!(loose_query_id(None), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_cast_integer_accepts_loose_values() {
        assert_eq!(cast_integer(Some(&json!(5)), "userID"), Ok(5));
        assert_eq!(cast_integer(Some(&json!("9")), "userID"), Ok(9));
        assert_eq!(cast_integer(Some(&json!(3.0)), "userID"), Ok(3));
        assert_eq!(cast_integer(Some(&json!(true)), "userID"), Ok(1));
    }

    #[test]
    fn test_cast_integer_failures_are_internal() {
        let err = cast_integer(Some(&json!("abc")), "userID").unwrap_err();
        assert_eq!(
            err.message(),
            "Cast to Number failed for value \"abc\" (type string) at path \"userID\" for model \"User\""
        );
        assert!(matches!(cast_integer(None, "userID"), Err(AppError::Internal(_))));
        assert!(matches!(cast_integer(Some(&json!("")), "userID"), Err(AppError::Internal(_))));
        assert!(matches!(cast_integer(Some(&json!(1.5)), "userID"), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_cast_optional_and_string() {
        assert_eq!(cast_optional_integer(None, "clicks"), Ok(None));
        assert_eq!(cast_optional_integer(Some(&Value::Null), "clicks"), Ok(None));
        assert_eq!(cast_optional_integer(Some(&json!(10)), "clicks"), Ok(Some(10)));
        assert_eq!(cast_string(Some(&json!("laser")), "upgrades"), Ok("laser".to_string()));
        assert_eq!(cast_string(Some(&json!(2)), "upgrades"), Ok("2".to_string()));
        assert!(cast_string(Some(&json!(["a"])), "upgrades").is_err());
    }
}
