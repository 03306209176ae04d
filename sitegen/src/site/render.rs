use anyhow::Context;
use photomapcore::filter::months::MONTH_ABBREVIATIONS;
use photomapcore::Cluster;

use crate::workflow::config::SiteConfig;

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");
pub const STYLE_CSS: &str = include_str!("../../assets/style.css");
pub const MAP_JS: &str = include_str!("../../assets/map.js");

/// Fills the embedded page template with the snapshot and page text.
pub fn render_index_html(config: &SiteConfig, clusters: &[Cluster]) -> anyhow::Result<String> {
    let clusters_json =
        serde_json::to_string_pretty(clusters).context("serializing cluster snapshot")?;

    Ok(INDEX_TEMPLATE
        .replace("{{ title }}", &escape_html(&config.title))
        .replace("{{ subtitle }}", &escape_html(&config.subtitle))
        .replace("{{ month_buttons }}", &month_buttons())
        .replace("{{ initial_zoom }}", &config.initial_zoom.to_string())
        .replace("{{ clusters_json }}", &embed_json(&clusters_json)))
}

// A literal "</script>" inside a filename would end the inline script early.
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn month_buttons() -> String {
    MONTH_ABBREVIATIONS
        .iter()
        .enumerate()
        .map(|(index, name)| {
            format!(
                "                    <button class=\"month-btn selected\" data-month=\"{}\">{}</button>",
                index, name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomapcore::clustering::SnapshotStage;
    use photomapcore::{ClusterInput, ClusterStage, PhotoRecord};

    fn snapshot(photos: &[PhotoRecord]) -> Vec<Cluster> {
        let mut stage = SnapshotStage::new();
        stage.initialize(&Default::default()).unwrap();
        stage.execute(ClusterInput::new(photos)).unwrap()
    }

    #[test]
    fn page_contains_snapshot_and_all_placeholders_filled() {
        let photos = vec![
            PhotoRecord::new("oak.jpg", 40.0, -74.0).with_web_path("photos/oak.jpg"),
            PhotoRecord::new("elm.jpg", 41.0, -75.0).with_web_path("photos/elm.jpg"),
        ];
        let html = render_index_html(&SiteConfig::default(), &snapshot(&photos)).unwrap();

        assert!(!html.contains("{{"));
        assert!(html.contains("<title>Tree Photos Explorer</title>"));
        assert!(html.contains("\"filename\": \"oak.jpg\""));
        assert!(html.contains("\"web_path\": \"photos/elm.jpg\""));
        assert!(html.contains("PhotoMap.start(photoClusters, 10)"));
        assert_eq!(html.matches("class=\"month-btn selected\"").count(), 12);
        assert!(html.contains("data-month=\"11\">Dec</button>"));
    }

    #[test]
    fn page_text_and_json_are_escaped() {
        let config = SiteConfig {
            title: "Oaks & <Elms>".to_string(),
            ..Default::default()
        };
        let photos = vec![PhotoRecord::new("</script>.jpg", 40.0, -74.0)];
        let html = render_index_html(&config, &snapshot(&photos)).unwrap();

        assert!(html.contains("Oaks &amp; &lt;Elms&gt;"));
        assert!(html.contains("<\\/script>.jpg"));
        assert!(!html.contains("\"</script>.jpg\""));
    }

    #[test]
    fn empty_snapshot_renders_empty_array() {
        let html = render_index_html(&SiteConfig::default(), &[]).unwrap();
        assert!(html.contains("const photoClusters = [];"));
    }
}
