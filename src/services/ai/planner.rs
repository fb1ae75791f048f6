use crate::errors::AppError;
use crate::services::ai::{LlmProvider, Message};
use crate::services::tools::tool_specs;

fn system_prompt() -> String {
    let tools = tool_specs()
        .iter()
        .map(|t| format!("- Use '{}' to {}", t.name, t.purpose))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful assistant that creates a step-by-step plan to handle a customer's request.\n\
         ALWAYS include specific tool names in your plan:\n\
         {tools}\n\
         Be explicit about which tools to use."
    )
}

pub async fn create_plan(llm: &dyn LlmProvider, intent: &str) -> anyhow::Result<String> {
    let messages = [Message::user(format!(
        "The intent of the user is: {intent}. Please create a plan."
    ))];

    let plan = llm.chat(&system_prompt(), &messages).await?;
    if plan.trim().is_empty() {
        return Err(AppError::Ai("model returned an empty plan".to_string()).into());
    }

    tracing::info!(intent, plan = %plan, "generated plan");
    Ok(plan)
}
