use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("CAMPUS_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .or_else(|_| std::env::var("API_KEY"))
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("CAMPUS_TEXT_MODEL")
            && !model.is_empty()
        {
            self.text_model = model;
        }

        if let Ok(model) = std::env::var("CAMPUS_IMAGE_MODEL")
            && !model.is_empty()
        {
            self.image_model = model;
        }

        if let Ok(temp_str) = std::env::var("CAMPUS_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.chat_temperature = temp;
        }
    }
}
