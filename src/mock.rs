//! Mock responder
//!
//! Answers for models without a configured API key. Replies come from a fixed
//! set of templates; which one is used is decided by an injectable
//! [`TemplatePicker`].

use rand::Rng;

/// Number of mock reply templates
pub const TEMPLATE_COUNT: usize = 5;

/// Chooses a template index in `0..count`
pub trait TemplatePicker: Send + Sync {
    fn pick(&self, count: usize) -> usize;
}

/// Picks uniformly at random using the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl TemplatePicker for RandomPicker {
    fn pick(&self, count: usize) -> usize {
        rand::rng().random_range(0..count)
    }
}

/// Always picks the same template (wrapped into range)
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl TemplatePicker for FixedPicker {
    fn pick(&self, count: usize) -> usize {
        self.0 % count
    }
}

/// Render template `index` for `message` and the model's display name
pub fn render_template(index: usize, message: &str, model_name: &str) -> String {
    match index % TEMPLATE_COUNT {
        0 => format!(
            "I understand you said: '{message}'. This is a mock response from {model_name}. To get real AI responses, please add your API key to the .env file."
        ),
        1 => format!(
            "Mock response from {model_name}: I can help you with '{message}'. Add your API key for real AI assistance!"
        ),
        2 => format!(
            "Hello! I'm {model_name} in mock mode. You asked about '{message}'. Please configure your API key for full functionality."
        ),
        3 => format!(
            "Mock AI response: '{message}' is an interesting question. I'd love to help with real AI responses once you add your API key!"
        ),
        _ => format!(
            "Currently running in demo mode with {model_name}. Your message: '{message}'. Add API key for real AI capabilities!"
        ),
    }
}

/// Deterministic stand-in for a real provider
pub struct MockResponder {
    picker: Box<dyn TemplatePicker>,
}

impl MockResponder {
    pub fn new(picker: Box<dyn TemplatePicker>) -> Self {
        Self { picker }
    }

    /// Responder backed by the thread RNG
    pub fn random() -> Self {
        Self::new(Box::new(RandomPicker))
    }

    pub fn respond(&self, message: &str, model_name: &str) -> String {
        let index = self.picker.pick(TEMPLATE_COUNT);
        render_template(index, message, model_name)
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::random()
    }
}
