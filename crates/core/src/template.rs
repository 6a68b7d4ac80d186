//! Presentation templates and placeholder substitution.
//!
//! A template is plain text with a single `{{markdownContent}}` marker. The
//! markdown is inserted verbatim; rendering happens later inside the
//! presentation library the template references.

use crate::error::{Error, Result};

/// The marker replaced with the markdown source.
pub const PLACEHOLDER: &str = "{{markdownContent}}";

/// Built-in reveal.js template, used when no template file is given.
///
/// Asset references are relative to the `reveal.js/` directory of the
/// unpacked bundle, which is where the generated document is written.
pub const DEFAULT_TEMPLATE: &str = r#"
<!doctype html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">
        <title>slidev</title>
        <link rel="stylesheet" href="dist/reset.css">
        <link rel="stylesheet" href="dist/reveal.css">
        <link rel="stylesheet" href="dist/theme/black.css">
        <link rel="stylesheet" href="plugin/highlight/monokai.css">
    </head>
    <body>
        <div class="reveal">
            <div class="slides">
                <section data-markdown data-separator="^---" data-separator-vertical="^--">
                    <textarea data-template>
                        {{markdownContent}}
                    </textarea>
                </section>
            </div>
        </div>
        <script src="dist/reveal.js"></script>
        <script src="plugin/notes/notes.js"></script>
        <script src="plugin/markdown/markdown.js"></script>
        <script src="plugin/highlight/highlight.js"></script>
        <script>
            Reveal.initialize({
                hash: true,
                plugins: [ RevealMarkdown, RevealHighlight, RevealNotes ]
            });
        </script>
    </body>
</html>
"#;

/// How templates with a placeholder count other than one are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    /// Replace the first occurrence. A template without the placeholder is
    /// written unchanged; extra occurrences are left as they are.
    #[default]
    Lenient,
    /// Reject templates that don't contain the placeholder exactly once.
    Strict,
}

/// Output of a single substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The rendered document text.
    pub text: String,
    /// How many placeholders the template contained.
    pub placeholder_count: usize,
}

/// Performs the placeholder substitution under a given policy.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    policy: PlaceholderPolicy,
}

impl TemplateRenderer {
    /// Create a renderer with the lenient policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different placeholder policy.
    pub fn with_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Insert `markdown` into `template` in place of the placeholder.
    ///
    /// Occurrences are counted in the template alone, so markdown that happens
    /// to contain the marker is never substituted into itself.
    pub fn render(&self, template: &str, markdown: &str) -> Result<Substitution> {
        let placeholder_count = count_placeholders(template);

        if self.policy == PlaceholderPolicy::Strict && placeholder_count != 1 {
            return Err(Error::InvalidTemplate(format!(
                "expected exactly one {} but found {}",
                PLACEHOLDER, placeholder_count
            )));
        }

        match placeholder_count {
            0 => log::warn!(
                "Template has no {} placeholder; writing it unchanged",
                PLACEHOLDER
            ),
            1 => {}
            n => log::warn!(
                "Template has {} {} placeholders; only the first is replaced",
                n,
                PLACEHOLDER
            ),
        }

        Ok(Substitution {
            text: template.replacen(PLACEHOLDER, markdown, 1),
            placeholder_count,
        })
    }
}

/// Count non-overlapping placeholder occurrences.
pub fn count_placeholders(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_has_one_placeholder() {
        assert_eq!(count_placeholders(DEFAULT_TEMPLATE), 1);
    }

    #[test]
    fn test_single_placeholder_replaced() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("<pre>{{markdownContent}}</pre>", "# Title")
            .unwrap();

        assert_eq!(out.text, "<pre># Title</pre>");
        assert_eq!(out.placeholder_count, 1);
    }

    #[test]
    fn test_missing_placeholder_leaves_template_unchanged() {
        let renderer = TemplateRenderer::new();
        let template = "<html><body>static</body></html>";
        let out = renderer.render(template, "# ignored").unwrap();

        assert_eq!(out.text, template);
        assert_eq!(out.placeholder_count, 0);
    }

    #[test]
    fn test_lenient_replaces_only_first() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("{{markdownContent}}|{{markdownContent}}", "md")
            .unwrap();

        assert_eq!(out.text, "md|{{markdownContent}}");
        assert_eq!(out.placeholder_count, 2);
    }

    #[test]
    fn test_strict_rejects_missing_and_repeated() {
        let renderer = TemplateRenderer::new().with_policy(PlaceholderPolicy::Strict);

        assert!(matches!(
            renderer.render("no marker", "md"),
            Err(Error::InvalidTemplate(_))
        ));
        assert!(matches!(
            renderer.render("{{markdownContent}}{{markdownContent}}", "md"),
            Err(Error::InvalidTemplate(_))
        ));
        assert!(renderer.render("[{{markdownContent}}]", "md").is_ok());
    }

    #[test]
    fn test_markdown_is_inserted_verbatim() {
        let renderer = TemplateRenderer::new();
        let markdown = "# Grüße 🎉\n---\n<b>&amp;</b>\t\u{7}\n--\n{{markdownContent}}";
        let out = renderer.render("<x>{{markdownContent}}</x>", markdown).unwrap();

        assert_eq!(out.text, format!("<x>{}</x>", markdown));
        assert_eq!(out.placeholder_count, 1);
    }
}
