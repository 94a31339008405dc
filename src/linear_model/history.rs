use crate::optimizer::LossReport;

/// Loss reports collected during one `fit`, in epoch order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingHistory {
    reports: Vec<LossReport>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: LossReport) {
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[LossReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn last(&self) -> Option<&LossReport> {
        self.reports.last()
    }

    pub fn train_losses(&self) -> impl Iterator<Item = f64> + '_ {
        self.reports.iter().map(|r| r.train_loss)
    }
}

impl IntoIterator for TrainingHistory {
    type Item = LossReport;
    type IntoIter = std::vec::IntoIter<LossReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.into_iter()
    }
}
