//! In-memory namespace → topic → samples mapping.

use std::collections::BTreeMap;
use std::path::Path;

use super::player::TablesPlayer;
use super::types::TableRecord;
use crate::core::types::TimeSeries;
use crate::error::{KshetraError, Result};

type Topics = BTreeMap<String, TimeSeries<Vec<f64>>>;

/// Extracted log tables for one recording.
///
/// Every topic is a [`TimeSeries`] of flat numeric arrays, already sorted and
/// de-duplicated by timestamp.
#[derive(Debug, Clone, Default)]
pub struct LogTables {
    namespaces: BTreeMap<String, Topics>,
}

impl LogTables {
    /// Group records by namespace and topic.
    pub fn from_records(records: impl IntoIterator<Item = TableRecord>) -> Self {
        let mut grouped: BTreeMap<String, BTreeMap<String, Vec<(f64, Vec<f64>)>>> =
            BTreeMap::new();
        for r in records {
            grouped
                .entry(r.namespace)
                .or_default()
                .entry(r.topic)
                .or_default()
                .push((r.timestamp, r.values));
        }

        let namespaces = grouped
            .into_iter()
            .map(|(ns, topics)| {
                let topics = topics
                    .into_iter()
                    .map(|(topic, samples)| (topic, TimeSeries::from_pairs(samples)))
                    .collect();
                (ns, topics)
            })
            .collect();
        Self { namespaces }
    }

    /// Read every record of a tables file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let player = TablesPlayer::open(path)?;
        let records = player.collect::<super::Result<Vec<_>>>()?;
        Ok(Self::from_records(records))
    }

    /// Replace one topic's samples.
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        topic: impl Into<String>,
        series: TimeSeries<Vec<f64>>,
    ) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(topic.into(), series);
    }

    /// Samples on `namespace/topic`, or [`KshetraError::MissingTopic`].
    pub fn topic(&self, namespace: &str, topic: &str) -> Result<&TimeSeries<Vec<f64>>> {
        self.namespaces
            .get(namespace)
            .and_then(|topics| topics.get(topic))
            .ok_or_else(|| KshetraError::MissingTopic {
                namespace: namespace.to_string(),
                topic: topic.to_string(),
            })
    }

    /// Namespaces in sorted order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// `(namespace, topic, sample count)` for every topic.
    pub fn summary(&self) -> Vec<(&str, &str, usize)> {
        self.namespaces
            .iter()
            .flat_map(|(ns, topics)| {
                topics
                    .iter()
                    .map(move |(topic, series)| (ns.as_str(), topic.as_str(), series.len()))
            })
            .collect()
    }

    /// True when no topic has been loaded.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tables::TablesRecorder;
    use tempfile::TempDir;

    #[test]
    fn test_grouping_and_sorting() {
        let tables = LogTables::from_records([
            TableRecord::new("sim", "system_map", 2.0, vec![0.0, 0.0, 0.5]),
            TableRecord::new("sim", "system_map", 1.0, vec![0.0, 0.0, 0.4]),
            TableRecord::new("mission_control", "mission_control", 5.0, vec![0.0; 4]),
        ]);

        let maps = tables.topic("sim", "system_map").unwrap();
        assert_eq!(maps.timestamps(), &[1.0, 2.0]);
        assert_eq!(maps.values()[0], vec![0.0, 0.0, 0.4]);
        assert_eq!(tables.namespaces().collect::<Vec<_>>(), vec!["mission_control", "sim"]);
    }

    #[test]
    fn test_missing_topic() {
        let tables = LogTables::from_records([TableRecord::new("sim", "global_map", 0.0, vec![])]);
        let err = tables.topic("sim", "system_map").unwrap_err();
        assert!(matches!(
            err,
            KshetraError::MissingTopic { ref namespace, ref topic }
                if namespace == "sim" && topic == "system_map"
        ));
        assert!(tables.topic("other", "global_map").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bag.tables");
        let mut recorder = TablesRecorder::create(&path).unwrap();
        recorder
            .record_topic("sim", "all_robot_positions", [(1.0, vec![1.0, 1.0]), (0.0, vec![0.0, 0.0])])
            .unwrap();
        recorder.finish().unwrap();

        let tables = LogTables::load(&path).unwrap();
        assert_eq!(tables.summary(), vec![("sim", "all_robot_positions", 2)]);
    }

    #[test]
    fn test_load_missing_file_is_tables_error() {
        let err = LogTables::load("/nonexistent/bag.tables").unwrap_err();
        assert!(matches!(err, KshetraError::Tables(_)));
    }
}
