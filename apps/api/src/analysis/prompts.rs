//! Prompt Assembler — the fixed evaluation template and its renderer.

/// Evaluation template. `{knowledge}` and `{subject}` are the only placeholders.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Você é um assistente de recrutamento. Use as informações abaixo como contexto adicional:

FAQ:
{knowledge}

Currículo:
{subject}

Classifique o currículo e forneça uma saída estruturada exatamente nos seguintes campos, um por linha:

level: <Aprovado | A ser revisado | Rejeitado>
justification: <justificativa para a classificação>
suggestions: <sugestões para melhorias no currículo>

Não inclua nenhum outro texto antes ou depois desses três campos."#;

/// The two free-form inputs of a prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub subject_text: &'a str,
    pub knowledge_context: &'a str,
}

impl<'a> PromptContext<'a> {
    pub fn new(subject_text: &'a str, knowledge_context: &'a str) -> Self {
        Self {
            subject_text,
            knowledge_context,
        }
    }

    pub fn render(&self) -> String {
        render_template(
            ANALYSIS_PROMPT_TEMPLATE,
            &[
                ("knowledge", self.knowledge_context),
                ("subject", self.subject_text),
            ],
        )
    }
}

/// Substitutes `{name}` placeholders in a single pass over the template, so
/// braces inside the substituted values are never re-expanded.
fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
