//! Конфигурация контроллера (ControllerTunables из RON)
//!
//! Формат: RON, все поля опциональны (`#[serde(default)]`):
//! ```ron
//! (
//!     walk_speed: 3.5,
//!     sprint_speed: 8.0,
//!     look_sensitivity: (0.1, 0.1),
//! )
//! ```

use std::path::Path;

use thiserror::Error;

use crate::components::ControllerTunables;

/// Ошибки загрузки tunables
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tunables file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tunables: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid tunable `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Парсинг + валидация tunables из RON строки
pub fn parse_tunables(source: &str) -> Result<ControllerTunables, ConfigError> {
    let tunables: ControllerTunables = ron::from_str(source)?;
    validate_tunables(&tunables)?;
    Ok(tunables)
}

/// Загрузка tunables из RON файла
pub fn load_tunables(path: impl AsRef<Path>) -> Result<ControllerTunables, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    parse_tunables(&source)
}

/// Проверка значений (author-time: ловим опечатки до игры)
pub fn validate_tunables(tunables: &ControllerTunables) -> Result<(), ConfigError> {
    let non_negative = [
        ("walk_speed", tunables.walk_speed),
        ("sprint_speed", tunables.sprint_speed),
        ("acceleration", tunables.acceleration),
        ("jump_height", tunables.jump_height),
        ("gravity_scale", tunables.gravity_scale),
        ("fov_smoothing", tunables.fov_smoothing),
    ];

    for (field, value) in non_negative {
        if !value.is_finite() {
            return Err(ConfigError::Invalid { field, reason: "must be finite" });
        }
        if value < 0.0 {
            return Err(ConfigError::Invalid { field, reason: "must be non-negative" });
        }
    }

    if !tunables.look_sensitivity.is_finite() {
        return Err(ConfigError::Invalid {
            field: "look_sensitivity",
            reason: "must be finite",
        });
    }

    if !(0.0..=90.0).contains(&tunables.pitch_limit) {
        return Err(ConfigError::Invalid {
            field: "pitch_limit",
            reason: "must be within [0, 90] degrees",
        });
    }

    for (field, value) in [("normal_fov", tunables.normal_fov), ("sprint_fov", tunables.sprint_fov)] {
        if !(value > 0.0 && value < 180.0) {
            return Err(ConfigError::Invalid {
                field,
                reason: "must be within (0, 180) degrees",
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let tunables = parse_tunables("()").unwrap();
        assert_eq!(tunables, ControllerTunables::default());
    }

    #[test]
    fn test_partial_override() {
        let tunables = parse_tunables("(walk_speed: 5.0, look_sensitivity: (0.2, 0.15))").unwrap();

        assert_eq!(tunables.walk_speed, 5.0);
        assert_eq!(tunables.look_sensitivity.x, 0.2);
        assert_eq!(tunables.look_sensitivity.y, 0.15);
        // Остальное по умолчанию
        assert_eq!(tunables.sprint_speed, 8.0);
        assert_eq!(tunables.pitch_limit, 85.0);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_tunables(&ControllerTunables::default()).is_ok());
    }

    #[test]
    fn test_negative_speed_rejected() {
        let result = parse_tunables("(sprint_speed: -1.0)");

        match result {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "sprint_speed"),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_pitch_limit_range() {
        let tunables = ControllerTunables {
            pitch_limit: 120.0,
            ..Default::default()
        };

        assert!(matches!(
            validate_tunables(&tunables),
            Err(ConfigError::Invalid { field: "pitch_limit", .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_tunables("(walk_speed: fast)"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_tunables("definitely/not/here/controller.ron");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
