// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

pub fn format_duration(dur: Duration) -> String {
    let ms = dur.as_millis();

    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        let secs = ms / 1000;
        let rem = ms % 1000;
        if rem == 0 {
            format!("{}s", secs)
        } else {
            format!("{}.{:03}s", secs, rem)
        }
    } else {
        let secs = dur.as_secs();
        let minutes = secs / 60;
        let seconds = secs % 60;
        format!("{}m {}s", minutes, seconds)
    }
}
