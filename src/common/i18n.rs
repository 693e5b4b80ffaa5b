// src/common/i18n.rs

use std::collections::HashMap;

// Catálogo de mensagens de erro por idioma.
// Os arquivos JSON são embutidos no binário em tempo de compilação,
// então não há I/O nem falha possível em runtime depois do load().
#[derive(Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<String, String>>,
}

const DEFAULT_LOCALE: &str = "en";

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs: HashMap<&'static str, HashMap<String, String>> = HashMap::new();

        catalogs.insert("en", serde_json::from_str(include_str!("../../i18n/en.json"))?);
        catalogs.insert("pt", serde_json::from_str(include_str!("../../i18n/pt.json"))?);

        Ok(Self { catalogs })
    }

    /// Resolve um código de erro para a mensagem do idioma pedido.
    /// Fallback: idioma padrão -> o próprio código.
    pub fn message(&self, locale: &str, code: &str) -> String {
        if let Some(catalog) = self.catalogs.get(locale) {
            if let Some(msg) = catalog.get(code) {
                return msg.clone();
            }
        }

        self.catalogs
            .get(DEFAULT_LOCALE)
            .and_then(|catalog| catalog.get(code))
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_message_in_requested_locale() {
        let store = I18nStore::load().unwrap();
        let pt = store.message("pt", "room_unavailable");
        let en = store.message("en", "room_unavailable");
        assert_ne!(pt, en);
        assert!(pt.contains("reservado"));
    }

    #[test]
    fn unknown_locale_falls_back_to_default() {
        let store = I18nStore::load().unwrap();
        let msg = store.message("de", "record_not_found");
        assert_eq!(msg, store.message("en", "record_not_found"));
    }

    #[test]
    fn unknown_code_falls_back_to_code() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.message("en", "no_such_code"), "no_such_code");
    }
}
