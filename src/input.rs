use toroidal_life::config::{MIRROR_REGION_SIZE, TICK_RATE_STEP};
use toroidal_life::simulation::{Command, PatternKind};
use winit::dpi::PhysicalPosition;
use winit::keyboard::KeyCode;

/// Grid cell under a cursor position, for the given cell size
pub fn cell_at(position: PhysicalPosition<f64>, cell_size: u32) -> (i64, i64) {
    let size = cell_size.max(1) as f64;
    (
        (position.x / size).floor() as i64,
        (position.y / size).floor() as i64,
    )
}

/// Key-to-command table.
///
/// `cursor` is the grid cell under the pointer, used by stamping and
/// mirroring; `cell_size` is the current zoom.
pub fn command_for_key(key: KeyCode, cursor: (i64, i64), cell_size: u32) -> Option<Command> {
    let (x, y) = cursor;
    let stamp = |kind: PatternKind, rotate: bool| {
        let pattern = kind.pattern();
        Command::StampPattern {
            pattern: if rotate { pattern.rotate90() } else { pattern },
            x,
            y,
        }
    };

    let command = match key {
        KeyCode::Space => Command::TogglePause,
        KeyCode::ArrowLeft => Command::Rewind,
        KeyCode::ArrowRight => Command::StepForward,
        KeyCode::KeyS => Command::ResetGrid,
        KeyCode::KeyQ => Command::ToggleDeadCellVisibility,
        KeyCode::KeyG => Command::ToggleGridLines,
        KeyCode::KeyX => Command::ToggleCopyBox,

        // Up speeds the simulation up by shortening the tick
        KeyCode::ArrowUp => Command::SetTickRate(-TICK_RATE_STEP),
        KeyCode::ArrowDown => Command::SetTickRate(TICK_RATE_STEP),

        KeyCode::KeyC => Command::SetZoom(cell_size.saturating_sub(1)),
        KeyCode::KeyV => Command::SetZoom(cell_size + 1),

        KeyCode::Digit1 => stamp(PatternKind::Glider, false),
        KeyCode::Digit2 => stamp(PatternKind::GosperGliderGun, true),
        KeyCode::Digit3 => stamp(PatternKind::Pulsar, true),
        KeyCode::Digit4 => stamp(PatternKind::LightweightSpaceship, false),
        KeyCode::Digit5 => stamp(PatternKind::Rabbits, false),
        KeyCode::KeyR => Command::StampRandom { x, y },

        KeyCode::KeyT => Command::MirrorRegion {
            x,
            y,
            size: MIRROR_REGION_SIZE,
        },
        KeyCode::KeyB => Command::CycleRule,
        KeyCode::KeyK => Command::ToggleColorMode,
        _ => return None,
    };

    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at() {
        assert_eq!(cell_at(PhysicalPosition::new(0.0, 0.0), 8), (0, 0));
        assert_eq!(cell_at(PhysicalPosition::new(15.9, 16.0), 8), (1, 2));
        assert_eq!(cell_at(PhysicalPosition::new(-1.0, 3.0), 8), (-1, 0));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(command_for_key(KeyCode::Space, (0, 0), 8), Some(Command::TogglePause));
        assert_eq!(command_for_key(KeyCode::ArrowLeft, (0, 0), 8), Some(Command::Rewind));
        assert_eq!(command_for_key(KeyCode::ArrowRight, (0, 0), 8), Some(Command::StepForward));
        assert_eq!(command_for_key(KeyCode::KeyX, (0, 0), 8), Some(Command::ToggleCopyBox));
        assert_eq!(command_for_key(KeyCode::KeyZ, (0, 0), 8), None);
    }

    #[test]
    fn test_pattern_keys_use_cursor() {
        let command = command_for_key(KeyCode::Digit2, (40, 12), 8);
        match command {
            Some(Command::StampPattern { pattern, x, y }) => {
                assert_eq!((x, y), (40, 12));
                // the gun is stamped rotated
                assert_eq!((pattern.width(), pattern.height()), (9, 36));
            }
            other => panic!("expected a stamp, got {:?}", other),
        }
    }

    #[test]
    fn test_zoom_keys() {
        assert_eq!(command_for_key(KeyCode::KeyC, (0, 0), 8), Some(Command::SetZoom(7)));
        assert_eq!(command_for_key(KeyCode::KeyV, (0, 0), 8), Some(Command::SetZoom(9)));
        assert_eq!(command_for_key(KeyCode::KeyC, (0, 0), 0), Some(Command::SetZoom(0)));
    }
}
