// src/menu/actions.rs
use crate::error::{AlignError, XyzError};
use crate::io;
use crate::menu::{parse_line, Command, CommandError};
use crate::model::{SelectionChange, VisualAid};
use crate::state::Session;
use crate::utils::report;
use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    File(#[from] XyzError),
}

fn describe_aids(change: &SelectionChange) -> String {
    let name = |aid: VisualAid| match aid {
        VisualAid::Line => "alignment line",
        VisualAid::Triangle => "plane triangle",
    };
    let mut out = String::new();
    if let Some(aid) = change.retract {
        out.push_str(&format!(", remove {}", name(aid)));
    }
    if let Some(aid) = change.show {
        out.push_str(&format!(", draw {}", name(aid)));
    }
    out
}

/// Executes one command against the session and returns the console text.
pub fn run(session: &mut Session, cmd: Command) -> Result<String, ActionError> {
    match cmd {
        Command::Load(path) => {
            let model = io::load_model(&path)?;
            let summary = report::structure_summary(&model, &path);
            session.load_model(model);
            Ok(summary)
        }
        Command::Select(index) => {
            let change = session.toggle_atom(index)?;
            let aids = describe_aids(&change);
            let mut msg = format!("{:?} #{} ({} selected{})", change.outcome, index, change.size, aids);
            if let Some(model) = session.model() {
                msg.push('\n');
                msg.push_str(&report::selection_report(model, session.selection()));
            }
            Ok(msg)
        }
        Command::Clear => {
            let change = session.clear_selection();
            Ok(format!("Selection cleared{}", describe_aids(&change)))
        }
        Command::Align(target) => {
            let r = session.align_selection_to(&target)?;
            Ok(format!(
                "Aligned to {} (rotation {:.3}°, RMSD {:.4} Å)",
                target, r.angle_deg, r.rmsd
            ))
        }
        Command::Plane(plane) => {
            let r = session.align_plane_to(&plane)?;
            Ok(format!(
                "Aligned plane to {} (rotation {:.3}°, RMSD {:.4} Å)",
                plane, r.angle_deg, r.rmsd
            ))
        }
        Command::Translate(p) => {
            session.translate_selection_to(p)?;
            Ok(format!("Translated to ({:.6}, {:.6}, {:.6})", p[0], p[1], p[2]))
        }
        Command::Lattice(system) => {
            session.set_crystal_system(system);
            Ok(format!("Crystal system: {:?}", session.crystal_system()))
        }
        Command::Report => match session.model() {
            Some(model) => Ok(report::selection_report(model, session.selection())),
            None => Err(AlignError::NoModel.into()),
        },
        Command::Export(path) => {
            let model = session.model().ok_or(AlignError::NoModel)?;
            io::save_model(&path, model, session.export_comment)?;
            Ok(format!("Exported {} atoms to {}", model.len(), path))
        }
    }
}

/// Runs a command script line by line; a failing line is logged and skipped.
/// Returns the number of failed lines.
pub fn run_script<R: BufRead>(session: &mut Session, reader: R) -> std::io::Result<usize> {
    let mut failures = 0;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let result = parse_line(&line)
            .map_err(ActionError::from)
            .and_then(|cmd| cmd.map(|c| run(session, c)).transpose());

        match result {
            Ok(Some(msg)) => log::info!("{}", msg),
            Ok(None) => {}
            Err(e) => {
                failures += 1;
                log::error!("line {}: {}", i + 1, e);
            }
        }
    }
    Ok(failures)
}
