//! Template rendering over minijinja.
//!
//! Two lookup roots, `<templates>/html` and `<templates>/text`, share one
//! environment. Auto-escaping follows the template extension, so HTML
//! templates escape and text templates do not. Header fragments live in a
//! subdirectory of the HTML root and are addressed as
//! `<header_dir>/<name>.html`.

use crate::data::DataContext;
use crate::error::{Error, Result};
use minijinja::{Environment, ErrorKind, context};
use std::path::{Path, PathBuf};

/// Template renderer for one build invocation.
pub struct Renderer {
    env: Environment<'static>,
    templates_dir: PathBuf,
}

impl Renderer {
    /// Create a renderer rooted at `templates_dir`.
    pub fn new(templates_dir: &Path) -> Self {
        let html_root = templates_dir.join("html");
        let text_root = templates_dir.join("text");

        let mut env = Environment::new();
        // Keep control constructs from leaving blank lines in the output.
        env.set_trim_blocks(true);
        env.set_loader(move |name| {
            for root in [&html_root, &text_root] {
                let path = root.join(name);
                if path.is_file() {
                    return std::fs::read_to_string(&path).map(Some).map_err(|e| {
                        minijinja::Error::new(
                            ErrorKind::InvalidOperation,
                            format!("cannot read template {}", path.display()),
                        )
                        .with_source(e)
                    });
                }
            }
            Ok(None)
        });

        Self {
            env,
            templates_dir: templates_dir.to_path_buf(),
        }
    }

    /// Render the HTML template `<name>.html` with escaping enabled.
    pub fn render_html(&self, name: &str, data: &DataContext) -> Result<String> {
        self.render(&format!("{name}.html"), data)
    }

    /// Render the text template `<name>.txt` with escaping disabled.
    pub fn render_text(&self, name: &str, data: &DataContext) -> Result<String> {
        self.render(&format!("{name}.txt"), data)
    }

    /// Render a PDF header fragment with the person's name as its only
    /// context.
    pub fn render_header(&self, header_dir: &str, name: &str, person: &str) -> Result<String> {
        let file = format!("{header_dir}/{name}.html");
        let template = self.get(&file)?;
        template
            .render(context! { name => person })
            .map_err(|e| Error::Render {
                name: file,
                source: e,
            })
    }

    /// The merged data is exposed to templates under the single `context`
    /// variable, e.g. `{{ context.Header.name }}`.
    fn render(&self, file: &str, data: &DataContext) -> Result<String> {
        let template = self.get(file)?;
        template
            .render(context! { context => minijinja::Value::from_serialize(data) })
            .map_err(|e| Error::Render {
                name: file.to_string(),
                source: e,
            })
    }

    fn get(&self, file: &str) -> Result<minijinja::Template<'_, '_>> {
        self.env.get_template(file).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                Error::TemplateNotFound {
                    name: file.to_string(),
                    dir: self.templates_dir.clone(),
                }
            } else {
                Error::Render {
                    name: file.to_string(),
                    source: e,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(temp: &TempDir) -> PathBuf {
        let templates = temp.path().join("Templates");
        std::fs::create_dir_all(templates.join("html").join("headers")).unwrap();
        std::fs::create_dir_all(templates.join("text")).unwrap();
        templates
    }

    fn context_with_header(temp: &TempDir, name: &str) -> DataContext {
        let sources = temp.path().join("sources");
        let default = sources.join("Default");
        std::fs::create_dir_all(&default).unwrap();
        std::fs::write(default.join("Header.yaml"), format!("name: {name}\n")).unwrap();
        DataContext::merge(&sources, "Default").unwrap()
    }

    #[test]
    fn html_rendering_escapes() {
        let temp = TempDir::new().unwrap();
        let templates = setup(&temp);
        std::fs::write(
            templates.join("html").join("default.html"),
            "<h1>{{ context.Header.name }}</h1>",
        )
        .unwrap();

        let data = context_with_header(&temp, "Jane <Doe>");
        let html = Renderer::new(&templates)
            .render_html("default", &data)
            .unwrap();
        assert_eq!(html, "<h1>Jane &lt;Doe&gt;</h1>");
    }

    #[test]
    fn text_rendering_does_not_escape() {
        let temp = TempDir::new().unwrap();
        let templates = setup(&temp);
        std::fs::write(
            templates.join("text").join("default.txt"),
            "{{ context.Header.name }}",
        )
        .unwrap();

        let data = context_with_header(&temp, "Jane <Doe>");
        let text = Renderer::new(&templates)
            .render_text("default", &data)
            .unwrap();
        assert_eq!(text, "Jane <Doe>");
    }

    #[test]
    fn block_tags_do_not_leave_blank_lines() {
        let temp = TempDir::new().unwrap();
        let templates = setup(&temp);
        std::fs::write(
            templates.join("text").join("default.txt"),
            "{% if true %}\nline\n{% endif %}\n",
        )
        .unwrap();

        let data = context_with_header(&temp, "Jane Doe");
        let text = Renderer::new(&templates)
            .render_text("default", &data)
            .unwrap();
        assert_eq!(text, "line\n");
    }

    #[test]
    fn missing_template_names_the_file() {
        let temp = TempDir::new().unwrap();
        let templates = setup(&temp);
        let data = context_with_header(&temp, "Jane Doe");

        let err = Renderer::new(&templates)
            .render_html("nope", &data)
            .unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
        assert!(err.to_string().contains("nope.html"));
    }

    #[test]
    fn header_fragment_renders_name_only() {
        let temp = TempDir::new().unwrap();
        let templates = setup(&temp);
        std::fs::write(
            templates.join("html").join("headers").join("header_default.html"),
            "<div>{{ name }}</div>",
        )
        .unwrap();

        let html = Renderer::new(&templates)
            .render_header("headers", "header_default", "Jane Doe")
            .unwrap();
        assert_eq!(html, "<div>Jane Doe</div>");
    }
}
