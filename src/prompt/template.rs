//! Embedded documentation-generation template.

/// Instructions placed before the specification data
pub const INSTRUCTIONS: &str = "\
You are a senior technical writer. Write clear, well-structured developer \
documentation in Markdown for the HTTP API summarized below.

Guidelines:
- Output Markdown only. Start with a level-one heading naming the API.
- Open with a short overview of what the API is for, then document the \
endpoints grouped by resource.
- For each endpoint give the method and path, what it does, and an example \
request in a fenced code block where it helps.
- Use tables for parameters and model fields.
- Do not mention OpenAPI, Swagger, operation ids or other specification \
jargon; describe behavior in plain language.
- When a summary or description is missing, infer a helpful one from the \
path, method and names instead of writing that none is available.";

/// Values substituted into the template
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub endpoints: &'a str,
    pub schemas: &'a str,
}

/// Render the full prompt
pub fn render(vars: TemplateVars<'_>) -> String {
    format!(
        "{INSTRUCTIONS}\n\n\
         ## API\n\
         Title: {title}\n\
         Description: {description}\n\n\
         ## Endpoints\n\
         {endpoints}\n\n\
         ## Models\n\
         {schemas}\n",
        title = vars.title,
        description = vars.description,
        endpoints = vars.endpoints,
        schemas = vars.schemas,
    )
}
