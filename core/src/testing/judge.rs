use super::{
    diff,
    output::OutputResolver,
    result::{JudgeCode, TestOutcome},
    runner::{ExecError, Termination, TestRunner},
    testcase::FsTestcase,
};

/// Runs one testcase and classifies it.
/// Never fails: problems of the harness itself become [`JudgeCode::InternalError`].
pub async fn judge_testcase(
    runner: &TestRunner,
    resolver: &OutputResolver,
    testcase: &FsTestcase,
) -> TestOutcome {
    let name = testcase.name();

    if !testcase.has_groundtruth() {
        return TestOutcome::new(name, JudgeCode::MissingOutputFile).with_detail(format!(
            "{} does not exist",
            testcase.groundtruth_file().to_string_lossy()
        ));
    }

    let (input, groundtruth) = match tokio::try_join!(
        testcase.read_input(),
        testcase.read_groundtruth()
    ) {
        Ok(x) => x,
        Err(e) => return internal_error(name, e),
    };

    if let Err(e) = resolver.discard_stale() {
        return internal_error(name, e);
    }

    let exe = match runner.execute(&input).await {
        Ok(exe) => exe,
        Err(e @ ExecError::ExecutableNotFound { .. }) => {
            return TestOutcome::new(name, JudgeCode::ExecutableNotFound).with_detail(e.to_string())
        }
        Err(e) => return internal_error(name, e),
    };

    let mut outcome = TestOutcome {
        execution_time: Some(exe.execution_time),
        ..TestOutcome::new(name, JudgeCode::AC)
    };

    match exe.termination {
        Termination::TimedOut => {
            outcome.judge = JudgeCode::TLE;
            outcome.detail = Some(format!(
                "Killed after {:.1} seconds",
                runner.get_exec_time_limit().as_secs_f64()
            ));
            outcome.output = Some(exe.output);
            return outcome;
        }
        Termination::Signaled => {
            outcome.judge = JudgeCode::RE;
            outcome.detail = Some("Terminated by signal".to_owned());
            outcome.output = Some(exe.output);
            return outcome;
        }
        Termination::Exited(code) if code != 0 => {
            outcome.judge = JudgeCode::RE;
            outcome.detail = Some(format!("Exit code {}", code));
            outcome.output = Some(exe.output);
            return outcome;
        }
        Termination::Exited(_) => {}
    }

    let resolved = match resolver.resolve(&exe.output.stdout) {
        Ok(r) => r,
        Err(e) => return internal_error(name, e),
    };
    outcome.output = Some(exe.output);

    let Some(resolved) = resolved else {
        outcome.judge = JudgeCode::NoOutput;
        outcome.detail = Some(format!(
            "Neither {} nor stdout contains any output",
            resolver.output_file().to_string_lossy()
        ));
        return outcome;
    };
    outcome.output_source = Some(resolved.source);

    if let Some(d) = diff::compare(&groundtruth, &resolved.text) {
        outcome.judge = JudgeCode::WA;
        outcome.detail = Some(d.to_string());
    }
    outcome
}

fn internal_error(name: &str, e: impl Into<anyhow::Error>) -> TestOutcome {
    let e: anyhow::Error = e.into();
    log::debug!("Internal error on {}: {:?}", name, e);
    TestOutcome::new(name, JudgeCode::InternalError).with_detail(format!("{:#}", e))
}
