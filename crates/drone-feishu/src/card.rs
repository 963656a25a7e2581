//! Interactive card payload for the Feishu/Lark custom-bot webhook.

use serde::{Deserialize, Serialize};

use crate::cli::FooterStyle;
use crate::config::Config;
use crate::context::BuildContext;
use crate::markdown::render_body;
use crate::signature::sign;

const BUTTON_TEXT: &str = "去 Drone 查看本次构建详情";
const FOOTER_TEXT: &str = "🪧 以上信息由 drone 飞书机器人自动发出";
const FOOTER_LINK_TEXT: &str = "🔗 去 Drone 查看本次构建详情";

/// Request body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    pub timestamp: i64,
    pub sign: String,
    pub msg_type: MsgType,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MsgType {
    Interactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub template: Color,
    pub title: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
}

/// Card building blocks, discriminated by their `tag` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Element {
    PlainText {
        content: String,
    },
    LarkMd {
        content: String,
    },
    Markdown {
        content: String,
    },
    Action {
        actions: Vec<Element>,
    },
    Button {
        #[serde(rename = "type")]
        kind: ButtonKind,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        url: String,
        text: Box<Element>,
    },
    Note {
        elements: Vec<Element>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Primary,
}

impl Element {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Element::PlainText {
            content: content.into(),
        }
    }
}

/// Header color and title for the build outcome.
pub fn build_header(ctx: &BuildContext) -> Header {
    let (template, glyph, outcome) = if ctx.succeeded() {
        (Color::Green, "✅", "构建成功")
    } else {
        (Color::Red, "❌", "构建失败")
    };
    Header {
        template,
        title: Element::plain_text(format!(
            "{glyph} {} {outcome} #{}",
            ctx.repo_name, ctx.build_number
        )),
    }
}

/// Assemble the card: markdown body, then the build link, then the note.
pub fn build_card(config: &Config) -> Card {
    let ctx = &config.build;
    let mut elements = vec![Element::Markdown {
        content: render_body(ctx, config.style),
    }];
    elements.extend(footer(&ctx.build_link, config.footer));

    Card {
        header: build_header(ctx),
        elements,
    }
}

fn footer(build_link: &str, style: FooterStyle) -> Vec<Element> {
    let static_note = Element::Note {
        elements: vec![Element::plain_text(FOOTER_TEXT)],
    };
    if build_link.is_empty() {
        return vec![static_note];
    }

    match style {
        FooterStyle::Button => vec![
            Element::Action {
                actions: vec![Element::Button {
                    kind: ButtonKind::Primary,
                    url: build_link.to_string(),
                    text: Box::new(Element::plain_text(BUTTON_TEXT)),
                }],
            },
            static_note,
        ],
        FooterStyle::Link => vec![Element::Note {
            elements: vec![Element::LarkMd {
                content: format!("[{FOOTER_LINK_TEXT}]({build_link})"),
            }],
        }],
    }
}

impl SignedEnvelope {
    /// Sign and wrap the card for `config` at `timestamp` (Unix seconds).
    pub fn new(config: &Config, timestamp: i64) -> Self {
        Self {
            timestamp,
            sign: sign(timestamp, &config.secret),
            msg_type: MsgType::Interactive,
            card: build_card(config),
        }
    }
}
