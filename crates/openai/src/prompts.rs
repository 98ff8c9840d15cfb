use askama::Template;
use hypr_highlight_interface::GenerationRequest;

pub const SYSTEM_PROMPT: &str = "You are a professional copywriter and text editor";

#[derive(Template)]
#[template(path = "generation.md.jinja")]
pub struct GenerationPrompt<'a> {
    pub anchor: usize,
    pub keywords: String,
    pub smallest: usize,
    pub largest: usize,
    pub lines: Vec<(usize, &'a str)>,
}

impl<'a> GenerationPrompt<'a> {
    pub fn from_request(request: &GenerationRequest<'a>) -> Self {
        Self {
            anchor: request.anchor,
            keywords: request.theme_keywords.join(", "),
            smallest: request.bounds.min,
            largest: request.bounds.max,
            lines: request.numbered().collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "validation.md.jinja")]
pub struct ValidationPrompt<'a> {
    pub desired: usize,
    pub scripts: &'a [String],
}
