use chrono::NaiveTime;

pub fn format_clock(time: NaiveTime, twelve_hour: bool) -> String {
    if twelve_hour {
        time.format("%I:%M:%S %p").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}
