use std::io::{self, Write};
use std::path::Path;

use crate::kinematics::Pose;
use crate::signal::Measurement;

/// Write pose history to CSV format.
///
/// Columns: timestamp, x, y, z, pitch, yaw, roll
pub fn write_pose_history<W: Write>(writer: &mut W, history: &[(Pose, f64)]) -> io::Result<()> {
    writeln!(writer, "timestamp,x,y,z,pitch,yaw,roll")?;

    for (p, t) in history {
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.4},{:.4},{:.4}",
            t,
            p.x(), p.y(), p.z(),
            p.pitch(), p.yaw(), p.roll(),
        )?;
    }

    Ok(())
}

/// Write signal samples to CSV format.
///
/// Columns: timestamp, x, y, z, pitch, yaw, roll, signal_strength, signal_direction
pub fn write_measurements<W: Write>(writer: &mut W, samples: &[Measurement]) -> io::Result<()> {
    writeln!(writer, "timestamp,x,y,z,pitch,yaw,roll,signal_strength,signal_direction")?;

    for m in samples {
        let p = &m.pose;
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.4}",
            m.timestamp,
            p.x(), p.y(), p.z(),
            p.pitch(), p.yaw(), p.roll(),
            m.strength,
            m.bearing,
        )?;
    }

    Ok(())
}

/// Write pose history to a CSV file at the given path.
pub fn write_pose_history_file(path: impl AsRef<Path>, history: &[(Pose, f64)]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_pose_history(&mut file, history)?;
    file.flush()
}

/// Write signal samples to a CSV file at the given path.
pub fn write_measurements_file(path: impl AsRef<Path>, samples: &[Measurement]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_measurements(&mut file, samples)?;
    file.flush()
}
