use serde_json::Value;
use std::io;

use super::flatten_fields;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

/// Scalars go out as a two-column `field,value` block. Every array (a
/// schedule, a yearly breakdown) follows as its own block, introduced by a
/// one-column row naming its field path.
pub fn write_csv<W: io::Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(result @ Value::Object(_)) => result,
                _ => value,
            };
            let mut fields = Vec::new();
            flatten_fields("", body, &mut fields);
            let (arrays, scalars): (Vec<_>, Vec<_>) =
                fields.into_iter().partition(|(_, v)| v.is_array());

            wtr.write_record(["field", "value"])?;
            for (key, val) in &scalars {
                wtr.write_record([key.as_str(), &format_csv_value(val)])?;
            }
            for (key, val) in &arrays {
                if let Value::Array(rows) = val {
                    wtr.write_record([key.as_str()])?;
                    write_array_csv(&mut wtr, rows)?;
                }
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    // Headers come from the first object
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
