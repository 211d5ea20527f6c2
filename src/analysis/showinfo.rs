//! Decoder for ffmpeg `showinfo` diagnostic output
//!
//! Grammar consumed here, one diagnostic record per line:
//!
//! ```text
//! line      := prefix "pts_time:" timestamp (whitespace rest)?
//! timestamp := float
//! ```
//!
//! A line is a frame report iff it contains `pts_time:`. Only the token right
//! after the first marker is read; reports whose token is not a finite float
//! still count as frame reports but yield no timestamp.

const PTS_MARKER: &str = "pts_time:";

/// Timestamp carried by a single diagnostic line, if any
pub fn parse_pts_time(line: &str) -> Option<f64> {
    let (_, rest) = line.split_once(PTS_MARKER)?;
    let token = rest.split_whitespace().next()?;
    token.parse::<f64>().ok().filter(|t| t.is_finite())
}

/// All reported timestamps, ascending
pub fn parse_pts_times(output: &str) -> Vec<f64> {
    let mut timestamps: Vec<f64> = output.lines().filter_map(parse_pts_time).collect();
    timestamps.sort_by(f64::total_cmp);
    timestamps
}

/// Number of frame-report lines
pub fn count_frame_reports(output: &str) -> usize {
    output.lines().filter(|line| line.contains(PTS_MARKER)).count()
}
