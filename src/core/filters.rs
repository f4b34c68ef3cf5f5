use crate::models::{EmployerRecord, Industry, JobSeekerProfile};

/// Check whether an employer belongs to the job seeker's preferred industry.
///
/// The comparison is exact and case-sensitive against the stored value.
#[inline]
pub fn matches_industry(employer: &EmployerRecord, profile: &JobSeekerProfile) -> bool {
    is_in_industry(employer, profile.industry_preference)
}

#[inline]
pub fn is_in_industry(employer: &EmployerRecord, industry: Industry) -> bool {
    employer.industry == industry.as_str()
}

/// Employers eligible for scoring, in directory order
pub fn filter_by_industry<'a>(
    employers: &'a [EmployerRecord],
    profile: &JobSeekerProfile,
) -> Vec<&'a EmployerRecord> {
    employers
        .iter()
        .filter(|employer| matches_industry(employer, profile))
        .collect()
}
