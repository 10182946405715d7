use crate::models::WeatherNowResponse;

/// Formats current conditions into the fixed-order report.
///
/// Field values are rendered verbatim with their unit suffix.
pub fn format_weather_now(location: &str, weather: &WeatherNowResponse) -> String {
    let now = &weather.now;
    let mut output = format!("当前{}的天气状况为：\n", location);
    output.push_str(&format!("温度：{}℃\n", now.temp));
    output.push_str(&format!("体感温度：{}℃\n", now.feels_like));
    output.push_str(&format!("天气状况：{}\n", now.text));
    output.push_str(&format!("风向：{}\n", now.wind_dir));
    output.push_str(&format!("风力等级：{}\n", now.wind_scale));
    output.push_str(&format!("风速：{}公里/小时\n", now.wind_speed));
    output.push_str(&format!("相对湿度：{}%\n", now.humidity));
    output.push_str(&format!("过去1小时降水量：{}毫米\n", now.precip));
    output.push_str(&format!("更新时间：{}\n", weather.update_time));
    output
}
