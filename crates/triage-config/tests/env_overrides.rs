use figment::Jail;
use pretty_assertions::assert_eq;
use triage_config::TriageConfig;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("TRIAGE_ENGINE__HARD_MAX_QUESTIONS", "9");
        jail.set_env("TRIAGE_ENGINE__SOFT_MAX_QUESTIONS", "6");
        jail.set_env("TRIAGE_KNOWLEDGE__DIR", "/opt/kb");

        let config = TriageConfig::load().expect("config loads");
        assert_eq!(config.engine.hard_max_questions, 9);
        assert_eq!(config.engine.soft_max_questions, 6);
        assert_eq!(config.knowledge.dir, "/opt/kb");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".triage")?;
        jail.create_file(
            ".triage/config.toml",
            r#"
[engine]
training_gain_weight = 0.3
"#,
        )?;
        jail.set_env("TRIAGE_ENGINE__TRAINING_GAIN_WEIGHT", "0.05");

        let config = TriageConfig::load().expect("config loads");
        assert!((config.engine.training_gain_weight - 0.05).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn env_value_out_of_range_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("TRIAGE_ENGINE__SMOOTHING", "1.5");
        assert!(TriageConfig::load().is_err());
        Ok(())
    });
}
