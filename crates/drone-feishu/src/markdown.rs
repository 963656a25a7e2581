//! Markdown body of the build card.
//!
//! The body is an ordered list of optional sections. Each renderer returns
//! `None` when its source field is empty, and the survivors are joined one per
//! line, followed by a rule and the raw commit message.

use crate::cli::RenderStyle;
use crate::context::BuildContext;

const SHORT_SHA_LEN: usize = 8;

type Section = fn(&BuildContext, RenderStyle) -> Option<String>;

const SECTIONS: &[Section] = &[failed_steps, project, branch, tag, author, commit];

struct Label {
    icon: &'static str,
    text: &'static str,
    color: &'static str,
}

const FAILED: Label = Label { icon: "🙅🏻‍♂️", text: "失败", color: "red" };
const PROJECT: Label = Label { icon: "📦", text: "项目", color: "blue" };
const BRANCH: Label = Label { icon: "🖇️", text: "分支", color: "turquoise" };
const TAG: Label = Label { icon: "🏷️", text: "标签", color: "orange" };
const AUTHOR: Label = Label { icon: "👤", text: "提交", color: "violet" };
const COMMIT: Label = Label { icon: "📝", text: "信息", color: "indigo" };

/// Render the full markdown body for `ctx`.
pub fn render_body(ctx: &BuildContext, style: RenderStyle) -> String {
    let mut body: String = SECTIONS
        .iter()
        .filter_map(|section| section(ctx, style))
        .map(|line| line + "\n")
        .collect();
    body.push_str("\n---\n");
    body.push_str(&ctx.commit_message);
    body
}

fn line(label: &Label, style: RenderStyle, value: &str) -> String {
    match style {
        RenderStyle::Plain => format!("**{} {}：** {value}", label.icon, label.text),
        RenderStyle::Rich => format!(
            "<text_tag color='{}'>{}</text_tag> {value}",
            label.color, label.text
        ),
    }
}

/// `[text](url)`, or bare `text` when there is nowhere to link to.
fn link(text: &str, url: &str) -> String {
    if url.is_empty() {
        text.to_string()
    } else {
        format!("[{text}]({url})")
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn failed_steps(ctx: &BuildContext, style: RenderStyle) -> Option<String> {
    let steps = non_empty(&ctx.failed_steps)?;
    let value = match style {
        RenderStyle::Plain => steps.to_string(),
        RenderStyle::Rich => format!("<font color='red'>{steps}</font>"),
    };
    Some(line(&FAILED, style, &value))
}

fn project(ctx: &BuildContext, style: RenderStyle) -> Option<String> {
    Some(line(&PROJECT, style, &link(&ctx.repo_name, &ctx.repo_link)))
}

fn branch(ctx: &BuildContext, style: RenderStyle) -> Option<String> {
    non_empty(&ctx.branch).map(|b| line(&BRANCH, style, b))
}

fn tag(ctx: &BuildContext, style: RenderStyle) -> Option<String> {
    non_empty(&ctx.tag).map(|t| line(&TAG, style, t))
}

fn author(ctx: &BuildContext, style: RenderStyle) -> Option<String> {
    let who = match (ctx.author_name.as_str(), ctx.author.as_str()) {
        ("", "") => return None,
        (name, "") => name.to_string(),
        ("", login) => login.to_string(),
        (name, login) if name == login => login.to_string(),
        (name, login) => format!("{name}@{login}"),
    };
    let value = match non_empty(&ctx.author_email) {
        Some(email) => format!("[{who}](mailto:{email})"),
        None => who,
    };
    Some(line(&AUTHOR, style, &value))
}

fn commit(ctx: &BuildContext, style: RenderStyle) -> Option<String> {
    let sha = non_empty(&ctx.commit_sha)?;
    let text = format!("#{}", short_sha(sha));
    Some(line(&COMMIT, style, &link(&text, &ctx.commit_link)))
}

/// First eight characters of `sha`, or all of it when shorter.
fn short_sha(sha: &str) -> &str {
    sha.char_indices()
        .nth(SHORT_SHA_LEN)
        .map_or(sha, |(idx, _)| &sha[..idx])
}
