//! Terminal rendering of a trace
//!
//! Presentation only: one block per step with its header, variables, message
//! and call stack.

use std::fmt::Display;
use std::io::Write;

use crossterm::style::{ContentStyle, Stylize};

use super::ExportError;
use crate::trace::{Action, Step, Trace};
use crate::tree::format_level_order;

/// Visual emphasis class of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClass {
    /// `init`
    Init,
    /// `visit`
    Visit,
    /// `return`
    Return,
    /// `update` (answer changed or values pushed)
    Highlight,
    /// Everything else
    Other,
}

impl ActionClass {
    /// Classify an action
    pub fn of(action: &Action) -> Self {
        match action {
            Action::Init => ActionClass::Init,
            Action::Visit => ActionClass::Visit,
            Action::Return => ActionClass::Return,
            Action::Update => ActionClass::Highlight,
            _ => ActionClass::Other,
        }
    }

    fn style(self) -> ContentStyle {
        let base = ContentStyle::new();
        match self {
            ActionClass::Init => base.blue(),
            ActionClass::Visit => base.yellow(),
            ActionClass::Return => base.green(),
            ActionClass::Highlight => base.red(),
            ActionClass::Other => base.cyan(),
        }
    }
}

/// Terminal rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI styling
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

impl RenderOptions {
    /// No styling, for logs and snapshot tests
    pub fn plain() -> Self {
        Self { color: false }
    }
}

struct Painter {
    color: bool,
}

impl Painter {
    fn paint<D: Display>(&self, style: ContentStyle, text: D) -> String {
        if self.color {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Write the rendering of `trace` to `writer`
pub fn write_terminal<W: Write>(
    writer: &mut W,
    trace: &Trace,
    options: &RenderOptions,
) -> std::io::Result<()> {
    let painter = Painter {
        color: options.color,
    };
    let dim = ContentStyle::new().dim();

    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        painter.paint(
            ContentStyle::new().bold().magenta(),
            format!("=== {} — {} ===", trace.problem, trace.algorithm)
        )
    )?;
    writeln!(
        writer,
        "{}",
        painter.paint(dim, format!("Input: {}", format_level_order(&trace.tree_input)))
    )?;
    writeln!(writer)?;

    for step in &trace.steps {
        write_step(writer, &painter, step)?;
    }

    let answer = match trace.answer {
        Some(value) => value.to_string(),
        None => "none".to_string(),
    };
    writeln!(
        writer,
        "{}",
        painter.paint(ContentStyle::new().bold().green(), format!("Answer: {}", answer))
    )?;
    writeln!(writer)?;
    writer.flush()
}

fn write_step<W: Write>(writer: &mut W, painter: &Painter, step: &Step) -> std::io::Result<()> {
    let class = ActionClass::of(&step.action);
    let style = class.style();
    let dim = ContentStyle::new().dim();

    writeln!(
        writer,
        "{} · {} · Node {}",
        painter.paint(style.bold(), format!("Step {}", step.id)),
        painter.paint(style, &step.action),
        step.node_id
    )?;

    for (name, value) in &step.variables {
        writeln!(writer, "  {} = {}", painter.paint(ContentStyle::new().cyan(), name), value)?;
    }

    if !step.message.is_empty() {
        if class == ActionClass::Highlight {
            writeln!(
                writer,
                "  {}",
                painter.paint(ContentStyle::new().bold().red(), format!("★ {}", step.message))
            )?;
        } else {
            writeln!(writer, "  {}", painter.paint(dim, format!("» {}", step.message)))?;
        }
    }

    writeln!(
        writer,
        "  {}",
        painter.paint(dim, format!("Stack: [{}]", step.call_stack.join(" → ")))
    )?;
    writeln!(writer)
}

/// Render `trace` into a string
pub fn render_terminal(trace: &Trace, options: &RenderOptions) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_terminal(&mut buffer, trace, options).map_err(|source| ExportError::Io {
        path: "<memory>".into(),
        source,
    })?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{NodeStates, Tracer};
    use crate::tree::{build_tree, parse_level_order, LayoutConfig};
    use crate::vars;

    fn trace() -> Trace {
        let input = parse_level_order("[3,1]");
        let built = build_tree(&input, &LayoutConfig::default());
        let states = NodeStates::new(&built.nodes);
        let mut tracer = Tracer::begin("demo", "dfs");
        tracer.attach_tree(&input, &built.nodes).unwrap();
        tracer.push_call("dfs(3)");
        let spotlight = states.spotlight("n0").unwrap();
        tracer
            .emit("visit", "n0", &vars! { "node" => 3i64 }, spotlight, "Enter dfs(3)")
            .unwrap();
        tracer.push_call("dfs(1)");
        tracer
            .emit("update", "n1", &vars!(), states.snapshot(), "new best")
            .unwrap();
        tracer.pop_call().unwrap();
        tracer.pop_call().unwrap();
        tracer.export(Some(4)).unwrap()
    }

    #[test]
    fn test_classes() {
        assert_eq!(ActionClass::of(&Action::Update), ActionClass::Highlight);
        assert_eq!(ActionClass::of(&Action::Init), ActionClass::Init);
        assert_eq!(ActionClass::of(&Action::Compute), ActionClass::Other);
        assert_eq!(ActionClass::of(&Action::Other("x".into())), ActionClass::Other);
    }

    #[test]
    fn test_plain_rendering() {
        let text = render_terminal(&trace(), &RenderOptions::plain()).unwrap();
        assert!(text.contains("=== demo — dfs ==="));
        assert!(text.contains("Input: [3,1]"));
        assert!(text.contains("Step 1 · visit · Node n0"));
        assert!(text.contains("  node = 3"));
        assert!(text.contains("» Enter dfs(3)"));
        assert!(text.contains("★ new best"));
        assert!(text.contains("Stack: [dfs(3) → dfs(1)]"));
        assert!(text.contains("Answer: 4"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_color_rendering_uses_ansi() {
        let text = render_terminal(&trace(), &RenderOptions::default()).unwrap();
        assert!(text.contains('\x1b'));
        assert!(text.contains("Step 2"));
    }
}
