use crate::domain::model::{HandlerInfo, Student};
use crate::domain::ports::Handler;

/// Per-run state handed from handler to handler.
#[derive(Debug)]
pub struct CalculationContext<'a> {
    pub student: &'a mut Student,
    pub should_continue: bool,
    halted_by: Option<HaltReason>,
}

/// Why a handler stopped the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct HaltReason {
    pub handler: &'static str,
    pub message: String,
    pub rejected: bool,
}

impl<'a> CalculationContext<'a> {
    pub fn new(student: &'a mut Student) -> Self {
        Self {
            student,
            should_continue: true,
            halted_by: None,
        }
    }

    /// Stop the chain with the student ineligible for this calculator.
    pub fn reject(&mut self, handler: &'static str, message: impl Into<String>) {
        self.should_continue = false;
        self.halted_by = Some(HaltReason {
            handler,
            message: message.into(),
            rejected: true,
        });
    }

    /// Stop the chain because the score is already final.
    pub fn finish(&mut self, handler: &'static str, message: impl Into<String>) {
        self.should_continue = false;
        self.halted_by = Some(HaltReason {
            handler,
            message: message.into(),
            rejected: false,
        });
    }

    pub fn halted_by(&self) -> Option<&HaltReason> {
        self.halted_by.as_ref()
    }
}

/// Runs `process` on each handler in order until one clears `should_continue`.
pub fn handle(handlers: &[Box<dyn Handler>], context: &mut CalculationContext<'_>) {
    for handler in handlers {
        if !context.should_continue {
            break;
        }
        tracing::trace!(handler = handler.name(), student = %context.student.id, "running handler");
        handler.process(context);
    }
}

/// An ordered, immutable sequence of handlers.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `handler` after the current tail.
    pub fn then<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn handle(&self, context: &mut CalculationContext<'_>) {
        handle(&self.handlers, context);
    }

    pub fn infos(&self) -> Vec<HandlerInfo> {
        self.handlers.iter().map(|h| h.info()).collect()
    }
}
