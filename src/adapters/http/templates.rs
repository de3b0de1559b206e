use std::sync::Arc;
use tera::Tera;

const TEMPLATE_GLOB: &str = "templates/**/*.html.tera";

/// Template engine wrapper for rendering HTML templates
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  /// Create a template engine from the templates directory of the working directory
  pub fn new() -> Result<Self, tera::Error> {
    Self::from_glob(TEMPLATE_GLOB)
  }

  /// Create a template engine from an explicit glob
  pub fn from_glob(glob: &str) -> Result<Self, tera::Error> {
    let mut tera = Tera::new(glob)?;
    tera.autoescape_on(vec!["html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  /// Render a template with the given context
  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}

#[cfg(test)]
pub(crate) fn test_engine() -> TemplateEngine {
  TemplateEngine::from_glob(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/templates/**/*.html.tera"
  ))
  .expect("Failed to load templates")
}
