//! Article Command Handlers
//!
//! 两阶段生成：先请求大纲，再按大纲逐段续写，段落之间严格串行

use std::sync::Arc;

use crate::application::commands::GenerateArticle;
use crate::application::error::{ApplicationError, GenerationError, GenerationStage};
use crate::application::ports::{CompletionEnginePort, CompletionOptions};
use crate::domain::article::{
    build_outline_prompt, build_paragraph_prompt, parse_outline, OutlineParse, OutlinePoint,
    ParagraphPromptInput, RollingContext, DEFAULT_INSTRUCTION,
};
use crate::domain::style::StyleDna;

use super::AnalyzeStyleHandler;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// 两个阶段的采样参数
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub outline_options: CompletionOptions,
    pub paragraph_options: CompletionOptions,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let base = CompletionOptions::default();
        Self {
            outline_options: base.clone().with_temperature(0.7),
            paragraph_options: base.with_temperature(1.5),
        }
    }
}

/// 文章生成流水线
#[derive(Clone)]
pub struct ArticlePipeline {
    completion: Arc<dyn CompletionEnginePort>,
    settings: GenerationSettings,
}

impl ArticlePipeline {
    pub fn new(completion: Arc<dyn CompletionEnginePort>, settings: GenerationSettings) -> Self {
        Self {
            completion,
            settings,
        }
    }

    /// 生成完整文章，段落以空行分隔
    ///
    /// 任意一次补全失败都会中止整篇生成
    pub async fn generate(
        &self,
        topic: &str,
        style_dna: Option<&StyleDna>,
        instruction: &str,
    ) -> Result<String, GenerationError> {
        let outline = self.outline_stage(topic, style_dna).await?;
        let paragraphs = self
            .paragraph_stage(outline.points(), style_dna, instruction)
            .await?;

        tracing::info!(
            topic = %topic,
            paragraphs = paragraphs.len(),
            fallback_outline = outline.is_fallback(),
            "Article generated"
        );

        Ok(paragraphs.join(PARAGRAPH_SEPARATOR))
    }

    /// 大纲阶段：一次补全调用，解析失败时降级为固定大纲
    pub async fn outline_stage(
        &self,
        topic: &str,
        style_dna: Option<&StyleDna>,
    ) -> Result<OutlineParse, GenerationError> {
        let prompt = build_outline_prompt(topic, style_dna);
        let response = self
            .completion
            .complete(&prompt, &self.settings.outline_options)
            .await
            .map_err(|source| GenerationError {
                stage: GenerationStage::Outline,
                source,
            })?;

        let outline = parse_outline(&response, topic);
        match &outline {
            OutlineParse::Parsed(points) => {
                tracing::debug!(points = points.len(), "Outline parsed");
            }
            OutlineParse::Fallback { reason, .. } => {
                tracing::warn!(topic = %topic, reason = %reason, "Outline unusable, using fallback outline");
            }
        }

        Ok(outline)
    }

    /// 段落阶段：每个要点一次补全调用，上一段的开头作为下一段的上下文
    pub async fn paragraph_stage(
        &self,
        outline: &[OutlinePoint],
        style_dna: Option<&StyleDna>,
        instruction: &str,
    ) -> Result<Vec<String>, GenerationError> {
        let mut paragraphs = Vec::with_capacity(outline.len());
        let mut context = RollingContext::first();

        for (i, point) in outline.iter().enumerate() {
            let input = ParagraphPromptInput {
                instruction,
                style_dna,
                outline_point: &point.point,
                previous_context: &context,
            };
            let paragraph = self.next_paragraph(i + 1, &input).await?;

            context = RollingContext::after(&paragraph);
            paragraphs.push(paragraph);
        }

        Ok(paragraphs)
    }

    async fn next_paragraph(
        &self,
        number: usize,
        input: &ParagraphPromptInput<'_>,
    ) -> Result<String, GenerationError> {
        let prompt = build_paragraph_prompt(input);
        let paragraph = self
            .completion
            .complete(&prompt, &self.settings.paragraph_options)
            .await
            .map_err(|source| GenerationError {
                stage: GenerationStage::Paragraph(number),
                source,
            })?;

        tracing::debug!(paragraph = number, chars = paragraph.chars().count(), "Paragraph generated");
        Ok(paragraph.trim().to_string())
    }
}

/// 仿写响应
#[derive(Debug, Clone)]
pub struct GenerateArticleResponse {
    pub article: String,
    pub style_dna: Option<StyleDna>,
}

/// GenerateArticle Handler
#[derive(Clone)]
pub struct GenerateArticleHandler {
    style_handler: AnalyzeStyleHandler,
    pipeline: ArticlePipeline,
}

impl GenerateArticleHandler {
    pub fn new(style_handler: AnalyzeStyleHandler, pipeline: ArticlePipeline) -> Self {
        Self {
            style_handler,
            pipeline,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateArticle,
    ) -> Result<GenerateArticleResponse, ApplicationError> {
        let topic = command.topic.trim();
        if topic.is_empty() {
            return Err(ApplicationError::validation("topic 不能为空"));
        }

        let style_dna = self
            .style_handler
            .analyze_sample(command.style_sample.as_deref())?;
        let instruction = command
            .instruction
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_INSTRUCTION);

        let article = self
            .pipeline
            .generate(topic, style_dna.as_ref(), instruction)
            .await?;

        Ok(GenerateArticleResponse { article, style_dna })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::test_support::ScriptedCompletion;
    use crate::application::ports::CompletionError;
    use crate::domain::article::CONTEXT_CHARS;
    use crate::domain::style::{analyze_style, StyleAnalyzer};

    const OUTLINE: &str = r#"Here you go:
[
  {"index": 1, "point": "Origins", "connection": "Start"},
  {"index": 2, "point": "Culture", "connection": "Continue"},
  {"index": 3, "point": "Today", "connection": "Wrap up"}
]"#;

    fn pipeline(engine: &Arc<ScriptedCompletion>) -> ArticlePipeline {
        ArticlePipeline::new(engine.clone(), GenerationSettings::default())
    }

    fn previous_context(prompt: &str) -> &str {
        let start = prompt.find("Previous_Context: ").unwrap() + "Previous_Context: ".len();
        let end = prompt.find("\n\n### Response:").unwrap();
        &prompt[start..end]
    }

    #[tokio::test]
    async fn test_one_call_per_outline_point_plus_outline() {
        let long_first = "A".repeat(250);
        let engine = Arc::new(ScriptedCompletion::ok(&[
            OUTLINE,
            long_first.as_str(),
            "  Second paragraph.  ",
            "Third paragraph.",
        ]));

        let article = pipeline(&engine).generate("tea", None, DEFAULT_INSTRUCTION).await.unwrap();

        let prompts = engine.prompts();
        assert_eq!(prompts.len(), 1 + 3);
        assert!(prompts[0].starts_with("Create a structured outline"));
        assert!(prompts[1].contains("Current_Outline_Point: Origins"));
        assert!(prompts[3].contains("Current_Outline_Point: Today"));

        assert_eq!(
            previous_context(&prompts[1]),
            "[First paragraph - no previous context]"
        );
        let ctx = previous_context(&prompts[2]);
        assert_eq!(ctx.chars().count(), CONTEXT_CHARS);
        assert!(long_first.starts_with(ctx));
        assert_eq!(previous_context(&prompts[3]), "Second paragraph.");

        assert_eq!(
            article,
            format!("{}\n\nSecond paragraph.\n\nThird paragraph.", long_first)
        );
    }

    #[tokio::test]
    async fn test_stage_temperatures() {
        let engine = Arc::new(ScriptedCompletion::ok(&[OUTLINE, "a", "b", "c"]));
        pipeline(&engine).generate("tea", None, DEFAULT_INSTRUCTION).await.unwrap();

        let calls = engine.calls();
        assert_eq!(calls[0].1.temperature, 0.7);
        assert!(calls[1..].iter().all(|(_, opts)| opts.temperature == 1.5));
        assert_eq!(calls[1].1.stop, vec!["###".to_string(), "</s>".to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_outline_uses_five_point_fallback() {
        let engine = Arc::new(ScriptedCompletion::ok(&["I cannot produce JSON today."]));

        let article = pipeline(&engine).generate("coffee", None, DEFAULT_INSTRUCTION).await.unwrap();

        let prompts = engine.prompts();
        assert_eq!(prompts.len(), 1 + 5);
        assert!(prompts[1].contains("Current_Outline_Point: Introduction about coffee"));
        assert!(prompts[5].contains("Current_Outline_Point: Conclusion about coffee"));
        assert_eq!(article.split("\n\n").count(), 5);
    }

    #[tokio::test]
    async fn test_completion_failure_aborts_without_partial_article() {
        let engine = Arc::new(ScriptedCompletion::new(vec![
            Ok(OUTLINE.to_string()),
            Ok("First.".to_string()),
            Err(CompletionError::NetworkError("connection reset".to_string())),
        ]));

        let err = pipeline(&engine)
            .generate("tea", None, DEFAULT_INSTRUCTION)
            .await
            .unwrap_err();

        assert_eq!(err.stage, GenerationStage::Paragraph(2));
        assert_eq!(engine.prompts().len(), 3);
    }

    #[tokio::test]
    async fn test_outline_failure_reports_outline_stage() {
        let engine = Arc::new(ScriptedCompletion::new(vec![Err(
            CompletionError::ServiceError("HTTP 500".to_string()),
        )]));

        let err = pipeline(&engine)
            .generate("tea", None, DEFAULT_INSTRUCTION)
            .await
            .unwrap_err();
        assert_eq!(err.stage, GenerationStage::Outline);
    }

    #[tokio::test]
    async fn test_style_dna_flows_into_prompts() {
        let dna = analyze_style("And so it goes. And again. And more. But not this.").unwrap();
        let engine = Arc::new(ScriptedCompletion::ok(&[OUTLINE, "a", "b", "c"]));

        pipeline(&engine)
            .generate("tea", Some(&dna), "Continue.")
            .await
            .unwrap();

        let prompts = engine.prompts();
        assert!(prompts[0].contains("Style DNA to follow:"));
        assert!(prompts[1].contains("\"avg_sent_len\""));
        assert!(prompts[1].starts_with("### Instruction:\nContinue."));
    }

    #[tokio::test]
    async fn test_handler_validates_topic() {
        let engine = Arc::new(ScriptedCompletion::default());
        let handler = GenerateArticleHandler::new(
            AnalyzeStyleHandler::new(StyleAnalyzer::default()),
            pipeline(&engine),
        );

        let result = handler
            .handle(GenerateArticle {
                topic: "   ".to_string(),
                style_sample: None,
                instruction: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert!(engine.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_handler_uses_default_instruction_and_sample() {
        let engine = Arc::new(ScriptedCompletion::ok(&[OUTLINE, "a", "b", "c"]));
        let handler = GenerateArticleHandler::new(
            AnalyzeStyleHandler::new(StyleAnalyzer::default()),
            pipeline(&engine),
        );

        let response = handler
            .handle(GenerateArticle {
                topic: "tea".to_string(),
                style_sample: Some("I like tea. It is warm.".to_string()),
                instruction: Some("  ".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.article, "a\n\nb\n\nc");
        assert!(response.style_dna.is_some());
        assert!(engine.prompts()[1].contains(DEFAULT_INSTRUCTION));
    }
}
