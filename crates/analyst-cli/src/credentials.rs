//! Gemini API key loading

use std::io::{self, BufRead, Write};

/// Variables checked for the key, in order
pub const KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// First non-blank key among [`KEY_VARS`]
pub fn key_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    KEY_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Key from the environment, else instructions plus an interactive prompt
///
/// Returns `None` when the user enters nothing.
pub fn resolve_api_key(
    lookup: impl Fn(&str) -> Option<String>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<Option<String>> {
    if let Some(key) = key_from_env(lookup) {
        return Ok(Some(key));
    }

    writeln!(output, "⚠️  API Key do Gemini não encontrada!")?;
    writeln!(output)?;
    writeln!(output, "📝 Como obter gratuitamente:")?;
    writeln!(output, "   1. Acesse: https://aistudio.google.com/app/apikey")?;
    writeln!(output, "   2. Clique em 'Create API Key'")?;
    writeln!(output, "   3. Copie a chave gerada")?;
    writeln!(output)?;
    writeln!(output, "💡 Depois, crie um arquivo .env com:")?;
    writeln!(output, "   API_KEY=sua_chave_aqui")?;
    writeln!(output)?;
    write!(output, "Ou cole sua API Key aqui (ou Enter para sair): ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = line.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prefers_api_key_over_gemini_api_key() {
        let key = key_from_env(|var| match var {
            "API_KEY" => Some("primary".to_string()),
            "GEMINI_API_KEY" => Some("secondary".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("primary"));
    }

    #[test]
    fn blank_variable_falls_through() {
        let key = key_from_env(|var| match var {
            "API_KEY" => Some("  ".to_string()),
            "GEMINI_API_KEY" => Some("secondary".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("secondary"));
    }

    #[test]
    fn prompts_when_missing() {
        let mut input = Cursor::new("  pasted-key\n");
        let mut output = Vec::new();
        let key = resolve_api_key(|_| None, &mut input, &mut output).unwrap();

        assert_eq!(key.as_deref(), Some("pasted-key"));
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("aistudio.google.com/app/apikey"));
        assert!(printed.ends_with("(ou Enter para sair): "));
    }

    #[test]
    fn empty_answer_is_none() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert!(resolve_api_key(|_| None, &mut input, &mut output).unwrap().is_none());
    }
}
