//! Prompt templates for delegated review and task runs

/// Values substituted into the task system prompt.
#[derive(Debug, Clone, Copy)]
pub struct TaskPromptContext<'a> {
    pub repo_root: &'a str,
    pub task_id: &'a str,
    pub task_description: &'a str,
    pub plan_content: &'a str,
    pub project_memory: &'a str,
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Developer prompt for a read-only review conversation
    pub fn review_system(repo_root: &str, session: &str) -> String {
        format!(
            r#"You are a senior code reviewer examining a local repository on behalf of another agent.

# Repository Root
{repo_root}

# Session
{session}

# Your Role
Answer the review request precisely. Inspect the code before drawing conclusions: locate files
with Glob, search with Grep and read the relevant ranges with Read. Cite findings as
path:line. Point out bugs, security problems and risky changes first, then smaller issues.
You cannot modify files.

All paths are relative to the repository root. Secrets such as .env files, keys and the .git
directory are not accessible.

Available Tools: Glob, Grep, Read
"#
        )
    }

    /// Developer prompt for a task execution conversation (built-in fallback)
    pub fn task_system(ctx: &TaskPromptContext<'_>) -> String {
        format!(
            r#"You are a coding contractor executing Task #{task_id}.

# Repository Root
{repo_root}

# Task Description
{task_description}

# Plan Context
{plan_content}

# Project Guidelines
{project_memory}

# Your Role
Implement the task using available tools. Report progress with [PROGRESS] markers.

Available Tools: Glob, Grep, Read, Write, Edit
"#,
            task_id = ctx.task_id,
            repo_root = ctx.repo_root,
            task_description = ctx.task_description,
            plan_content = ctx.plan_content,
            project_memory = ctx.project_memory,
        )
    }

    /// Fill a user-supplied task template.
    ///
    /// Recognized placeholders: `{repo_root}`, `{task_id}`,
    /// `{task_description}`, `{plan_content}`, `{project_memory}`. Unknown
    /// braces are left alone.
    pub fn render_task_template(template: &str, ctx: &TaskPromptContext<'_>) -> String {
        template
            .replace("{repo_root}", ctx.repo_root)
            .replace("{task_id}", ctx.task_id)
            .replace("{task_description}", ctx.task_description)
            .replace("{plan_content}", ctx.plan_content)
            .replace("{project_memory}", ctx.project_memory)
    }

    /// First user turn of a task run
    pub fn task_input(task_id: &str, task_description: &str) -> String {
        format!("Execute Task #{}: {}", task_id, task_description)
    }

    /// Marker printed after a task run completes
    pub fn completion_marker(turns: usize) -> String {
        format!("[CODEX_COMPLETE] Task completed in {} iterations", turns)
    }
}
