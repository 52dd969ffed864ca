// src/errors/report.rs
//! Rendering utilities for miette diagnostics. Soft errors are drained from
//! the checker per file and rendered as one batch.

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, ThemeCharacters, ThemeStyles};

use super::sema::SoftError;

/// Handler for terminal output (unicode + colors).
pub fn terminal_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::unicode(),
        styles: ThemeStyles::ansi(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Handler for test assertions (ascii + no colors).
pub fn plain_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::ascii(),
        styles: ThemeStyles::none(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Render to a plain string (for tests and batch reporting).
pub fn render_to_string(report: &dyn Diagnostic) -> String {
    let mut output = String::new();
    let handler = plain_handler();
    let _ = handler.render_report(&mut output, report);
    output
}

/// Render a drained soft-error batch, one report per error, in sweep order.
/// The caller picks the handler (terminal or plain).
pub fn render_soft_errors(handler: &GraphicalReportHandler, errors: &[SoftError]) -> String {
    let mut output = String::new();
    for soft in errors {
        let _ = handler.render_report(&mut output, &soft.error);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SemanticError;
    use crate::frontend::Span;
    use crate::sema::TypeChecker;

    #[test]
    fn render_operator_error_to_string() {
        let err = SemanticError::OperatorWrongDataType {
            message: "cannot apply operator '+' to bool and string".to_string(),
            span: (4, 3).into(),
        };
        let output = render_to_string(&err);
        assert!(output.contains("E2101"), "should contain error code");
        assert!(output.contains("cannot apply operator '+'"));
    }

    #[test]
    fn render_with_help() {
        let err = SemanticError::UnsafeOperationInSafeContext {
            message: "pointer arithmetic on int*".to_string(),
            span: (0, 5).into(),
        };
        let output = render_to_string(&err);
        assert!(output.contains("E2102"));
        assert!(output.contains("help"), "should contain help text");
    }

    #[test]
    fn drained_batch_renders_every_error_in_order() {
        let mut checker = TypeChecker::new();
        checker.soft_error(
            SemanticError::ReassignConstVariable {
                name: "x".to_string(),
                span: (0, 1).into(),
            },
            Span::new(0, 1),
        );
        checker.soft_error(
            SemanticError::UnsafeOperationInSafeContext {
                message: "pointer arithmetic on int*".to_string(),
                span: (4, 5).into(),
            },
            Span::new(4, 5),
        );

        let drained = checker.check_for_soft_errors();
        let output = render_soft_errors(&plain_handler(), &drained);
        assert!(output.contains("E2103"));
        assert!(output.contains("E2102"));
        assert!(
            output.find("E2103").unwrap() < output.find("E2102").unwrap(),
            "batch keeps sweep order"
        );

        let themed = render_soft_errors(&terminal_handler(), &drained);
        assert!(themed.contains("cannot reassign constant 'x'"));
    }
}
