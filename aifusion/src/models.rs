use egui_phosphor::regular;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubModel {
    pub id: &'static str,
    pub name: &'static str,
    pub premium: bool,
}

impl SubModel {
    const fn free(id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            name,
            premium: false,
        }
    }

    const fn premium(id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            name,
            premium: true,
        }
    }
}

/// A provider pane on the model board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiModel {
    pub model: &'static str,
    pub icon: &'static str,
    pub premium: bool,
    pub enable: bool,
    pub sub_models: Vec<SubModel>,
}

impl AiModel {
    pub fn free_sub_models(&self) -> impl Iterator<Item = &SubModel> {
        self.sub_models.iter().filter(|m| !m.premium)
    }

    pub fn premium_sub_models(&self) -> impl Iterator<Item = &SubModel> {
        self.sub_models.iter().filter(|m| m.premium)
    }

    pub fn sub_model(&self, id: &str) -> Option<&SubModel> {
        self.sub_models.iter().find(|m| m.id == id)
    }
}

pub fn default_models() -> Vec<AiModel> {
    vec![
        AiModel {
            model: "GPT",
            icon: regular::SPARKLE,
            premium: false,
            enable: true,
            sub_models: vec![
                SubModel::free("gpt-4.1-mini", "GPT 4.1 Mini"),
                SubModel::free("gpt-4.1-nano", "GPT 4.1 Nano"),
                SubModel::premium("gpt-4.1", "GPT 4.1"),
                SubModel::premium("gpt-5", "GPT 5"),
            ],
        },
        AiModel {
            model: "Gemini",
            icon: regular::PLANET,
            premium: false,
            enable: true,
            sub_models: vec![
                SubModel::free("gemini-2.5-flash", "Gemini 2.5 Flash"),
                SubModel::free("gemini-2.0-flash", "Gemini 2.0 Flash"),
                SubModel::premium("gemini-2.5-pro", "Gemini 2.5 Pro"),
            ],
        },
        AiModel {
            model: "DeepSeek",
            icon: regular::BRAIN,
            premium: false,
            enable: true,
            sub_models: vec![
                SubModel::free("deepseek-chat", "DeepSeek V3"),
                SubModel::premium("deepseek-reasoner", "DeepSeek R1"),
            ],
        },
        AiModel {
            model: "Mistral",
            icon: regular::WIND,
            premium: false,
            enable: true,
            sub_models: vec![
                SubModel::free("mistral-small-latest", "Mistral Small"),
                SubModel::premium("mistral-large-latest", "Mistral Large"),
            ],
        },
        AiModel {
            model: "Grok",
            icon: regular::LIGHTNING,
            premium: true,
            enable: false,
            sub_models: vec![
                SubModel::premium("grok-3-mini", "Grok 3 Mini"),
                SubModel::premium("grok-3", "Grok 3"),
            ],
        },
        AiModel {
            model: "Cohere",
            icon: regular::FEATHER,
            premium: true,
            enable: false,
            sub_models: vec![SubModel::premium("command-r-plus", "Command R+")],
        },
        AiModel {
            model: "Llama",
            icon: regular::ROBOT,
            premium: false,
            enable: false,
            sub_models: vec![
                SubModel::free("llama-3.3-70b", "Llama 3.3 70B"),
                SubModel::premium("llama-4-maverick", "Llama 4 Maverick"),
            ],
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown model {0}")]
    UnknownModel(String),
    #[error("model {model} has no sub model {id}")]
    UnknownSubModel { model: String, id: String },
    #[error("{id} requires a premium plan")]
    PremiumLocked { model: String, id: String },
}

/// Provider panes plus the chosen sub model for each provider.
#[derive(Debug, Clone)]
pub struct ModelBoard {
    models: Vec<AiModel>,
    selected: IndexMap<String, String>,
}

impl Default for ModelBoard {
    fn default() -> Self {
        Self::new(default_models())
    }
}

impl ModelBoard {
    /// Every model starts on its first free sub model. Premium-only
    /// providers start with no selection.
    pub fn new(models: Vec<AiModel>) -> Self {
        let selected = models
            .iter()
            .filter_map(|m| {
                m.free_sub_models()
                    .next()
                    .map(|sub| (m.model.to_string(), sub.id.to_string()))
            })
            .collect();
        Self { models, selected }
    }

    /// Applies saved choices that still name a selectable sub model.
    pub fn with_preferences(mut self, prefs: &IndexMap<String, String>) -> Self {
        for (model, id) in prefs {
            if let Err(err) = self.select_sub_model(model, id) {
                tracing::warn!("dropping saved model preference: {err}");
            }
        }
        self
    }

    pub fn models(&self) -> &[AiModel] {
        &self.models
    }

    pub fn model(&self, model: &str) -> Option<&AiModel> {
        self.models.iter().find(|m| m.model == model)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &AiModel> {
        self.models.iter().filter(|m| m.enable)
    }

    pub fn set_enabled(&mut self, model: &str, enable: bool) -> Result<(), ModelError> {
        let entry = self
            .models
            .iter_mut()
            .find(|m| m.model == model)
            .ok_or_else(|| ModelError::UnknownModel(model.to_string()))?;
        entry.enable = enable;
        Ok(())
    }

    pub fn select_sub_model(&mut self, model: &str, id: &str) -> Result<(), ModelError> {
        let entry = self
            .model(model)
            .ok_or_else(|| ModelError::UnknownModel(model.to_string()))?;
        let sub = entry
            .sub_model(id)
            .ok_or_else(|| ModelError::UnknownSubModel {
                model: model.to_string(),
                id: id.to_string(),
            })?;
        if sub.premium {
            return Err(ModelError::PremiumLocked {
                model: model.to_string(),
                id: id.to_string(),
            });
        }
        self.selected.insert(model.to_string(), id.to_string());
        Ok(())
    }

    pub fn selected(&self, model: &str) -> Option<&str> {
        self.selected.get(model).map(String::as_str)
    }

    pub fn preferences(&self) -> &IndexMap<String, String> {
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_one_model_leaves_others() {
        let mut board = ModelBoard::default();
        let before: Vec<bool> = board.models().iter().map(|m| m.enable).collect();

        board.set_enabled("Gemini", false).unwrap();
        let after: Vec<bool> = board.models().iter().map(|m| m.enable).collect();
        for (idx, model) in board.models().iter().enumerate() {
            if model.model == "Gemini" {
                assert!(!after[idx]);
            } else {
                assert_eq!(before[idx], after[idx]);
            }
        }
        assert!(matches!(
            board.set_enabled("Nope", true),
            Err(ModelError::UnknownModel(_))
        ));
    }

    #[test]
    fn premium_sub_models_cannot_be_selected() {
        let mut board = ModelBoard::default();
        assert_eq!(board.selected("GPT"), Some("gpt-4.1-mini"));

        board.select_sub_model("GPT", "gpt-4.1-nano").unwrap();
        assert_eq!(board.selected("GPT"), Some("gpt-4.1-nano"));

        let err = board.select_sub_model("GPT", "gpt-5").unwrap_err();
        assert!(matches!(err, ModelError::PremiumLocked { .. }));
        assert_eq!(board.selected("GPT"), Some("gpt-4.1-nano"));

        assert!(matches!(
            board.select_sub_model("GPT", "gpt-0"),
            Err(ModelError::UnknownSubModel { .. })
        ));
    }

    #[test]
    fn premium_only_providers_start_unselected() {
        let board = ModelBoard::default();
        assert_eq!(board.selected("Grok"), None);
        assert_eq!(board.selected("Cohere"), None);
        assert_eq!(board.selected("Llama"), Some("llama-3.3-70b"));
        for (model, id) in board.preferences() {
            let sub = board.model(model).and_then(|m| m.sub_model(id)).unwrap();
            assert!(!sub.premium, "{model} seeded with premium {id}");
        }
    }

    #[test]
    fn stale_preferences_are_skipped() {
        let mut prefs = IndexMap::new();
        prefs.insert("Gemini".to_string(), "gemini-2.0-flash".to_string());
        prefs.insert("GPT".to_string(), "gpt-retired".to_string());
        prefs.insert("Gone".to_string(), "x".to_string());

        let board = ModelBoard::default().with_preferences(&prefs);
        assert_eq!(board.selected("Gemini"), Some("gemini-2.0-flash"));
        assert_eq!(board.selected("GPT"), Some("gpt-4.1-mini"));
        assert_eq!(board.selected("Gone"), None);
    }

    #[test]
    fn sub_model_groups_split_on_premium() {
        let board = ModelBoard::default();
        let gpt = board.model("GPT").unwrap();
        assert_eq!(gpt.free_sub_models().count(), 2);
        assert_eq!(gpt.premium_sub_models().count(), 2);
    }
}
