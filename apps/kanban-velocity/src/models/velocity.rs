//! Velocity rows at three grouping levels.
//!
//! Only the five base metrics are stored. Totals are derived from them on
//! read and emitted alongside the base metrics when a row is serialized.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Story points per delivery stage, split by production-fix flag.
pub struct VelocityMetrics {
    pub committed_non_prod_fixes: u64,
    pub completed_non_prod_fixes: u64,
    pub completed_prod_fixes: u64,
    pub deployed_non_prod_fixes: u64,
    pub deployed_prod_fixes: u64,
}

impl VelocityMetrics {
    pub fn total_committed_non_prod_fixes(&self) -> u64 {
        self.committed_non_prod_fixes + self.completed_non_prod_fixes
    }

    pub fn total_non_prod_fixes(&self) -> u64 {
        self.total_committed_non_prod_fixes() + self.deployed_non_prod_fixes
    }

    pub fn total_prod_fixes(&self) -> u64 {
        self.completed_prod_fixes + self.deployed_prod_fixes
    }

    pub fn grand_total(&self) -> u64 {
        self.total_non_prod_fixes() + self.total_prod_fixes()
    }
}

impl Add for VelocityMetrics {
    type Output = VelocityMetrics;

    fn add(mut self, rhs: VelocityMetrics) -> VelocityMetrics {
        self += rhs;
        self
    }
}

impl AddAssign for VelocityMetrics {
    fn add_assign(&mut self, rhs: VelocityMetrics) {
        self.committed_non_prod_fixes += rhs.committed_non_prod_fixes;
        self.completed_non_prod_fixes += rhs.completed_non_prod_fixes;
        self.completed_prod_fixes += rhs.completed_prod_fixes;
        self.deployed_non_prod_fixes += rhs.deployed_non_prod_fixes;
        self.deployed_prod_fixes += rhs.deployed_prod_fixes;
    }
}

impl Sum for VelocityMetrics {
    fn sum<I: Iterator<Item = VelocityMetrics>>(iter: I) -> VelocityMetrics {
        iter.fold(VelocityMetrics::default(), Add::add)
    }
}

impl<'a> Sum<&'a VelocityMetrics> for VelocityMetrics {
    fn sum<I: Iterator<Item = &'a VelocityMetrics>>(iter: I) -> VelocityMetrics {
        iter.copied().sum()
    }
}

impl Serialize for VelocityMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("VelocityMetrics", 9)?;
        st.serialize_field("committedNonProdFixes", &self.committed_non_prod_fixes)?;
        st.serialize_field("completedNonProdFixes", &self.completed_non_prod_fixes)?;
        st.serialize_field("completedProdFixes", &self.completed_prod_fixes)?;
        st.serialize_field("deployedNonProdFixes", &self.deployed_non_prod_fixes)?;
        st.serialize_field("deployedProdFixes", &self.deployed_prod_fixes)?;
        st.serialize_field(
            "totalCommittedNonProdFixes",
            &self.total_committed_non_prod_fixes(),
        )?;
        st.serialize_field("totalNonProdFixes", &self.total_non_prod_fixes())?;
        st.serialize_field("totalProdFixes", &self.total_prod_fixes())?;
        st.serialize_field("grandTotal", &self.grand_total())?;
        st.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VelocityByProjectAndUser {
    pub user: String,
    pub project: String,
    #[serde(flatten)]
    pub metrics: VelocityMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VelocityByUser {
    pub user: String,
    #[serde(flatten)]
    pub metrics: VelocityMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VelocityByProject {
    pub project: String,
    #[serde(flatten)]
    pub metrics: VelocityMetrics,
}
