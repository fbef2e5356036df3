use pulldown_cmark::{html, Options, Parser};

/// Markdown options matching what authors expect from GitHub-flavoured docs
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_GFM
}

/// Render Markdown document content to HTML.
///
/// Raw HTML embedded in the Markdown is passed through, documents are only
/// editable by authenticated admins.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
