// Step-sequencing engine for ARM Wizards
//
// A wizard is an ordered list of prompt steps followed by an ordered list of
// execute steps, threading one exclusively-owned mutable context through
// every step. A prompt step's outcome can contribute a sub-wizard, whose
// prompt steps are spliced immediately after the current position and whose
// execute steps join the pending execute list. Execution is strictly
// sequential; the first error aborts the run.

use async_trait::async_trait;
use tracing::debug;

use super::error::WizardError;

/// A unit that may ask the user a question and contribute further steps
#[async_trait]
pub trait PromptStep<C>: Send {
    /// Whether the step still needs to run against this context.
    ///
    /// Returning false skips both the prompt and any sub-wizard, so a caller
    /// can pre-populate the context to bypass a step entirely.
    fn should_prompt(&self, ctx: &C) -> bool {
        let _ = ctx;
        true
    }

    /// Ask the user and record the answer on the context
    async fn prompt(&mut self, ctx: &mut C) -> Result<(), WizardError>;

    /// Steps contributed by this step's outcome, spliced after it
    fn sub_wizard(&mut self, ctx: &mut C) -> Option<WizardOptions<C>> {
        let _ = ctx;
        None
    }
}

/// A unit that performs a side-effecting action after all prompting completes
#[async_trait]
pub trait ExecuteStep<C>: Send {
    /// Perform the action, recording results on the context
    async fn execute(&mut self, ctx: &mut C) -> Result<(), WizardError>;
}

/// An ordered collection of steps forming a wizard or sub-wizard
pub struct WizardOptions<C> {
    /// Title shown while prompting
    pub title: Option<String>,
    /// The steps to prompt for user input, in order
    pub prompt_steps: Vec<Box<dyn PromptStep<C>>>,
    /// The steps to execute, in order
    pub execute_steps: Vec<Box<dyn ExecuteStep<C>>>,
}

impl<C> WizardOptions<C> {
    /// Create an empty set of options
    pub fn new() -> Self {
        Self {
            title: None,
            prompt_steps: Vec::new(),
            execute_steps: Vec::new(),
        }
    }

    /// Set the wizard title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a prompt step
    pub fn with_prompt_step(mut self, step: impl PromptStep<C> + 'static) -> Self {
        self.prompt_steps.push(Box::new(step));
        self
    }

    /// Append an execute step
    pub fn with_execute_step(mut self, step: impl ExecuteStep<C> + 'static) -> Self {
        self.execute_steps.push(Box::new(step));
        self
    }
}

impl<C> Default for WizardOptions<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs prompt steps in order, then execute steps in order
pub struct Wizard<C> {
    /// Title of the run
    title: Option<String>,
    /// Pending prompt steps, grown in place by sub-wizards
    prompt_steps: Vec<Box<dyn PromptStep<C>>>,
    /// Pending execute steps
    execute_steps: Vec<Box<dyn ExecuteStep<C>>>,
}

impl<C> Wizard<C> {
    /// Create a wizard from assembled options
    pub fn new(options: WizardOptions<C>) -> Self {
        Self {
            title: options.title,
            prompt_steps: options.prompt_steps,
            execute_steps: options.execute_steps,
        }
    }

    /// Title of the run, if one was set
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Run the wizard to completion against the given context.
    ///
    /// The prompt phase finishes over the entire, possibly-grown step list
    /// before the execute phase starts. The first error (including
    /// cancellation) aborts the run; no cleanup is attempted here.
    pub async fn run(&mut self, ctx: &mut C) -> Result<(), WizardError> {
        let mut index = 0;
        while index < self.prompt_steps.len() {
            if self.prompt_steps[index].should_prompt(ctx) {
                self.prompt_steps[index].prompt(ctx).await?;

                if let Some(sub) = self.prompt_steps[index].sub_wizard(ctx) {
                    debug!(
                        "Step {} contributed {} prompt and {} execute step(s)",
                        index,
                        sub.prompt_steps.len(),
                        sub.execute_steps.len()
                    );
                    let tail = self.prompt_steps.split_off(index + 1);
                    self.prompt_steps.extend(sub.prompt_steps);
                    self.prompt_steps.extend(tail);
                    self.execute_steps.extend(sub.execute_steps);
                }
            } else {
                debug!("Skipping prompt step {} (already satisfied)", index);
            }
            index += 1;
        }

        for (index, step) in self.execute_steps.iter_mut().enumerate() {
            debug!("Running execute step {}", index);
            step.execute(ctx).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test context recording the order steps ran in
    #[derive(Default)]
    struct TraceContext {
        trace: Vec<String>,
        skip_b: bool,
    }

    struct RecordingPrompt {
        name: &'static str,
        sub: Option<Vec<&'static str>>,
    }

    impl RecordingPrompt {
        fn new(name: &'static str) -> Self {
            Self { name, sub: None }
        }

        fn with_sub(name: &'static str, sub: Vec<&'static str>) -> Self {
            Self {
                name,
                sub: Some(sub),
            }
        }
    }

    #[async_trait]
    impl PromptStep<TraceContext> for RecordingPrompt {
        fn should_prompt(&self, ctx: &TraceContext) -> bool {
            !(self.name == "b" && ctx.skip_b)
        }

        async fn prompt(&mut self, ctx: &mut TraceContext) -> Result<(), WizardError> {
            ctx.trace.push(format!("prompt:{}", self.name));
            Ok(())
        }

        fn sub_wizard(&mut self, _ctx: &mut TraceContext) -> Option<WizardOptions<TraceContext>> {
            let names = self.sub.take()?;
            let mut options = WizardOptions::new();
            for name in names {
                options = options.with_prompt_step(RecordingPrompt::new(name));
            }
            Some(options.with_execute_step(RecordingExecute { name: "create" }))
        }
    }

    struct RecordingExecute {
        name: &'static str,
    }

    #[async_trait]
    impl ExecuteStep<TraceContext> for RecordingExecute {
        async fn execute(&mut self, ctx: &mut TraceContext) -> Result<(), WizardError> {
            ctx.trace.push(format!("execute:{}", self.name));
            Ok(())
        }
    }

    struct FailingPrompt;

    #[async_trait]
    impl PromptStep<TraceContext> for FailingPrompt {
        async fn prompt(&mut self, _ctx: &mut TraceContext) -> Result<(), WizardError> {
            Err(WizardError::Cancelled)
        }
    }

    #[tokio::test]
    async fn test_prompt_steps_run_in_order() {
        let options = WizardOptions::new()
            .with_prompt_step(RecordingPrompt::new("a"))
            .with_prompt_step(RecordingPrompt::new("b"))
            .with_execute_step(RecordingExecute { name: "final" });

        let mut ctx = TraceContext::default();
        Wizard::new(options).run(&mut ctx).await.unwrap();

        assert_eq!(ctx.trace, vec!["prompt:a", "prompt:b", "execute:final"]);
    }

    #[tokio::test]
    async fn test_sub_wizard_splices_after_current_position() {
        let options = WizardOptions::new()
            .with_prompt_step(RecordingPrompt::with_sub("a", vec!["a1", "a2"]))
            .with_prompt_step(RecordingPrompt::new("b"));

        let mut ctx = TraceContext::default();
        Wizard::new(options).run(&mut ctx).await.unwrap();

        // contributed prompts run before "b"; the contributed execute step
        // runs only after all prompting
        assert_eq!(
            ctx.trace,
            vec![
                "prompt:a",
                "prompt:a1",
                "prompt:a2",
                "prompt:b",
                "execute:create"
            ]
        );
    }

    #[tokio::test]
    async fn test_satisfied_step_is_skipped() {
        let options = WizardOptions::new()
            .with_prompt_step(RecordingPrompt::new("a"))
            .with_prompt_step(RecordingPrompt::new("b"));

        let mut ctx = TraceContext {
            skip_b: true,
            ..Default::default()
        };
        Wizard::new(options).run(&mut ctx).await.unwrap();

        assert_eq!(ctx.trace, vec!["prompt:a"]);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_the_run() {
        let options = WizardOptions::new()
            .with_prompt_step(FailingPrompt)
            .with_prompt_step(RecordingPrompt::new("never"))
            .with_execute_step(RecordingExecute { name: "never" });

        let mut ctx = TraceContext::default();
        let err = Wizard::new(options).run(&mut ctx).await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(ctx.trace.is_empty());
    }
}
