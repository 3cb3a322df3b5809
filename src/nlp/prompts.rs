//! Prompt templates and text helpers for the curation workflow.

/// System message sent ahead of every request.
pub const SYSTEM_PROMPT: &str = "You are a systematic gene curation assistant for scientific publications.  Your output will be used verbatim. Do not include any commentary, explanations, apologies, or disclaimers. Only return the final result as plain text.";

/// Placeholder key substituted with the gene label.
pub const GENE_KEY: &str = "gene";

/// Stages of the curation prompt chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Quote everything the text says about the gene.
    Extract,
    /// Structured bullet-point review.
    Summary,
    /// One-sentence overview.
    ShortSummary,
    /// Display title.
    Title,
}

impl Stage {
    pub fn template(self) -> &'static str {
        match self {
            Self::Extract => "From the text given, extract and quote all of the information which is related to [gene]. Quote all specific results, data, inferences or conclusions that are relevant to this specific gene.  But do not infer activity based on other genes, focus only on this specific gene product. ",
            Self::Summary => "ROLE: You are a scientist preparing a literature review making a study of the of the gene known as [gene] GOAL: Your purpose is to systematically review the text and summarise. Think step-by-step using the following workflow: \n 1) Include any experiments conducted and their results, as well as all conclusions to do with the activity, location, domain or expression of this gene.\n 2) Include anything else that may be relevant to a scientist studying this gene. \n 3) Provide the key findings from your review in bullet point format. \n 4) Consider if each bullet point is based on direct evidence from a statement made in the text, or based on inferences you made from the text.\n 5) This gene is present in the text.  If it is only mentioned in passing, or without any conclusion, then include the context of where it is mentioned and supply direct quotes. \n 6) Classify each bullet point as \u{2018}Direct\u{2019} or \u{2018}Inferred\u{2019} in your response. \n Respond objectively.  Add no other commmentary. Do not refer to the gene by name or id as this is already included in the user output.",
            Self::ShortSummary => " Give a one-sentence overview summary for [gene] in the previous text. If the evidence is limited or uncertain do not give a misleading summary by making statements that do not have clear support; you must include any and all limitations of the evidence such as putative or hypothetical etc.   Add no other commmentary.  Do not refer to the gene by name or id as this is already included in the user output. ",
            Self::Title => " Give a short title describing the role of [gene] in the previous text. If the evidence is limited do not give a misleading title by making statements that do not have clear support; you must include any  limitations of the evidence such as putative or hypothetical etc. Add no other commmentary.  Do not refer to the gene by name or id as this is already included in the user output.",
        }
    }

    /// Template with `[gene]` replaced by `gene_label`.
    pub fn prompt(self, gene_label: &str) -> String {
        render(self.template(), &[(GENE_KEY, gene_label)])
    }
}

/// One-shot request for a summary of the paper's relevance to the gene.
pub fn relevance_prompt(gene_id: &str, pubmed_id: &str) -> String {
    format!(
        "Summarise the relevance of the paper with PubMed ID {pubmed_id} to the gene {gene_id}. \
         Describe what the paper reports about this gene, including experiments, results and \
         conclusions, and state any limitations of the evidence."
    )
}

/// Replace every `[key]` in `template` with its value.
pub fn render(template: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("[{key}]"), value)
        })
}

/// Human-readable gene reference including any synonyms.
pub fn gene_label(gene_id: &str, synonyms: &[String]) -> String {
    if synonyms.is_empty() {
        gene_id.to_string()
    } else {
        format!("{gene_id} ( also known as {} )", synonyms.join(" or "))
    }
}

/// Trim model output and drop one pair of enclosing quotes.
pub fn clean_output(text: &str) -> String {
    let text = text.trim();
    for quote in ['"', '\''] {
        if text.starts_with(quote) && text.ends_with(quote) {
            // Quotes are single-byte, so these slices stay on char boundaries.
            let inner = if text.len() >= 2 {
                &text[1..text.len() - 1]
            } else {
                ""
            };
            return inner.trim().to_string();
        }
    }
    text.to_string()
}
