//! Submission Wizard
//!
//! A four-step listing submission flow with forward-progress gating: a step
//! can only be reached once the step before it has captured its payload.
//! Backward navigation is always allowed and never discards captured data.
//!
//! Rejected transitions are a local UI guardrail, not a security boundary;
//! the external listing-creation endpoint re-validates the assembled
//! submission independently.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to wizard navigation and submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// An out-of-order transition was rejected. Callers treat this as a
    /// no-op; it is never surfaced to the external submission endpoint.
    #[error("cannot move to step {target:?} from step {current:?}")]
    StepSkipRejected {
        /// The step the wizard was on.
        current: Step,

        /// The step that was requested.
        target: Step,
    },

    /// Final submission was requested before every step captured its payload.
    #[error("submission requires all steps to be completed")]
    Incomplete,
}

/// The fixed, ordered steps of the listing submission flow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    /// Step 1: title, category, description, location.
    #[default]
    BasicInfo,

    /// Step 2: contact details and social links.
    ContactSocial,

    /// Step 3: season dates, pricing, and party size.
    Availability,

    /// Step 4: review and final submission (terminal).
    Review,
}

impl Step {
    /// The 1-based step number shown in the UI.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Step::BasicInfo => 1,
            Step::ContactSocial => 2,
            Step::Availability => 3,
            Step::Review => 4,
        }
    }

    /// The following step, capped at [`Step::Review`].
    fn next(self) -> Self {
        match self {
            Step::BasicInfo => Step::ContactSocial,
            Step::ContactSocial => Step::Availability,
            Step::Availability | Step::Review => Step::Review,
        }
    }
}

/// Payload captured by the basic info step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    /// Listing title.
    pub title: String,

    /// Listing category (e.g. "boat tour").
    pub category: String,

    /// Free-text description.
    pub description: String,

    /// Location name.
    pub location: String,
}

/// Payload captured by the contact and social step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSocial {
    /// Contact email address.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Optional website URL.
    pub website: Option<String>,

    /// Optional Instagram handle.
    pub instagram: Option<String>,
}

/// Payload captured by the availability and pricing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// First day of the bookable season.
    pub season_opens: Date,

    /// Last day of the bookable season.
    pub season_closes: Date,

    /// Price per person in minor currency units.
    pub price_per_person_minor: i64,

    /// Maximum party size per booking.
    pub max_party_size: u32,
}

/// A completed step's payload, tagged with the step it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepData {
    /// Basic info payload (step 1).
    BasicInfo(BasicInfo),

    /// Contact and social payload (step 2).
    ContactSocial(ContactSocial),

    /// Availability payload (step 3).
    Availability(Availability),
}

impl StepData {
    /// The step this payload belongs to.
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            StepData::BasicInfo(_) => Step::BasicInfo,
            StepData::ContactSocial(_) => Step::ContactSocial,
            StepData::Availability(_) => Step::Availability,
        }
    }
}

/// The assembled result of a fully completed wizard, ready to hand to the
/// external listing-creation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSubmission {
    /// Basic info payload.
    pub basic_info: BasicInfo,

    /// Contact and social payload.
    pub contact_social: ContactSocial,

    /// Availability payload.
    pub availability: Availability,
}

/// Progress through the listing submission flow.
///
/// A step's payload is `Some` iff that step has been completed at least once.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionWizard {
    current_step: Step,
    basic_info: Option<BasicInfo>,
    contact_social: Option<ContactSocial>,
    availability: Option<Availability>,
}

impl SubmissionWizard {
    /// Creates a fresh wizard on step 1 with no captured data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The step the wizard is currently on.
    #[must_use]
    pub fn current_step(&self) -> Step {
        self.current_step
    }

    /// The captured basic info payload, if step 1 has been completed.
    #[must_use]
    pub fn basic_info(&self) -> Option<&BasicInfo> {
        self.basic_info.as_ref()
    }

    /// The captured contact payload, if step 2 has been completed.
    #[must_use]
    pub fn contact_social(&self) -> Option<&ContactSocial> {
        self.contact_social.as_ref()
    }

    /// The captured availability payload, if step 3 has been completed.
    #[must_use]
    pub fn availability(&self) -> Option<&Availability> {
        self.availability.as_ref()
    }

    /// Whether the given step has captured its payload.
    ///
    /// [`Step::Review`] has no payload of its own; it counts as completed
    /// once every other step has captured data.
    #[must_use]
    pub fn step_completed(&self, step: Step) -> bool {
        match step {
            Step::BasicInfo => self.basic_info.is_some(),
            Step::ContactSocial => self.contact_social.is_some(),
            Step::Availability => self.availability.is_some(),
            Step::Review => {
                self.basic_info.is_some()
                    && self.contact_social.is_some()
                    && self.availability.is_some()
            }
        }
    }

    /// Stores a step's payload; advances to the following step when the
    /// payload belongs to the current step. Never moves backward.
    pub fn complete_step(&mut self, data: StepData) {
        let step = data.step();

        match data {
            StepData::BasicInfo(payload) => self.basic_info = Some(payload),
            StepData::ContactSocial(payload) => self.contact_social = Some(payload),
            StepData::Availability(payload) => self.availability = Some(payload),
        }

        if step == self.current_step {
            self.current_step = self.current_step.next();
        }
    }

    /// Navigates to a step.
    ///
    /// Revisiting any step up to the current one always succeeds and loses
    /// no data. Moving one step forward succeeds only once the current
    /// step's payload is present.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::StepSkipRejected`] for any other target.
    pub fn go_to_step(&mut self, target: Step) -> Result<(), WizardError> {
        let allowed = target <= self.current_step
            || (target == self.current_step.next() && self.step_completed(self.current_step));

        if allowed {
            self.current_step = target;

            Ok(())
        } else {
            Err(WizardError::StepSkipRejected {
                current: self.current_step,
                target,
            })
        }
    }

    /// Clears all captured data and returns to step 1.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Assembles the final submission for the external listing-creation
    /// collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Incomplete`] unless every step has captured
    /// its payload.
    pub fn submission(&self) -> Result<ListingSubmission, WizardError> {
        match (&self.basic_info, &self.contact_social, &self.availability) {
            (Some(basic_info), Some(contact_social), Some(availability)) => Ok(ListingSubmission {
                basic_info: basic_info.clone(),
                contact_social: contact_social.clone(),
                availability: *availability,
            }),
            _ => Err(WizardError::Incomplete),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn basic_info() -> BasicInfo {
        BasicInfo {
            title: "Sunset Kayak Tour".to_string(),
            category: "water sports".to_string(),
            description: "Two-hour guided paddle along the coast".to_string(),
            location: "Cala Ferrera".to_string(),
        }
    }

    fn contact_social() -> ContactSocial {
        ContactSocial {
            email: "hello@kayaktours.example".to_string(),
            phone: "+34 600 000 000".to_string(),
            website: Some("https://kayaktours.example".to_string()),
            instagram: None,
        }
    }

    fn availability() -> Availability {
        Availability {
            season_opens: date(2026, 5, 1),
            season_closes: date(2026, 10, 15),
            price_per_person_minor: 4500,
            max_party_size: 8,
        }
    }

    #[test]
    fn starts_on_step_one_with_no_data() {
        let wizard = SubmissionWizard::new();

        assert_eq!(wizard.current_step(), Step::BasicInfo);
        assert!(wizard.basic_info().is_none());
        assert!(wizard.contact_social().is_none());
        assert!(wizard.availability().is_none());
    }

    #[test]
    fn forward_navigation_is_gated_on_completion() -> TestResult {
        let mut wizard = SubmissionWizard::new();

        let rejected = wizard.go_to_step(Step::ContactSocial);
        assert_eq!(
            rejected,
            Err(WizardError::StepSkipRejected {
                current: Step::BasicInfo,
                target: Step::ContactSocial,
            })
        );
        assert_eq!(wizard.current_step(), Step::BasicInfo);

        wizard.complete_step(StepData::BasicInfo(basic_info()));
        assert_eq!(wizard.current_step(), Step::ContactSocial);

        // Going back never loses data captured for other steps.
        wizard.complete_step(StepData::ContactSocial(contact_social()));
        wizard.go_to_step(Step::BasicInfo)?;

        assert_eq!(wizard.current_step(), Step::BasicInfo);
        assert!(wizard.contact_social().is_some());

        Ok(())
    }

    #[test]
    fn skipping_ahead_is_rejected() {
        let mut wizard = SubmissionWizard::new();

        wizard.complete_step(StepData::BasicInfo(basic_info()));

        let rejected = wizard.go_to_step(Step::Review);

        assert!(matches!(
            rejected,
            Err(WizardError::StepSkipRejected { .. })
        ));
        assert_eq!(wizard.current_step(), Step::ContactSocial);
    }

    #[test]
    fn forward_step_allowed_when_current_is_complete() -> TestResult {
        let mut wizard = SubmissionWizard::new();

        wizard.complete_step(StepData::BasicInfo(basic_info()));
        wizard.go_to_step(Step::BasicInfo)?;

        // Step 1 is complete, so moving forward to step 2 is allowed even
        // after revisiting step 1.
        wizard.go_to_step(Step::ContactSocial)?;
        assert_eq!(wizard.current_step(), Step::ContactSocial);

        Ok(())
    }

    #[test]
    fn completing_an_earlier_step_does_not_move_backward() {
        let mut wizard = SubmissionWizard::new();

        wizard.complete_step(StepData::BasicInfo(basic_info()));
        wizard.complete_step(StepData::ContactSocial(contact_social()));
        assert_eq!(wizard.current_step(), Step::Availability);

        // Re-submitting step 1 data updates the payload but stays put.
        wizard.complete_step(StepData::BasicInfo(basic_info()));
        assert_eq!(wizard.current_step(), Step::Availability);
    }

    #[test]
    fn progression_caps_at_review() {
        let mut wizard = SubmissionWizard::new();

        wizard.complete_step(StepData::BasicInfo(basic_info()));
        wizard.complete_step(StepData::ContactSocial(contact_social()));
        wizard.complete_step(StepData::Availability(availability()));
        assert_eq!(wizard.current_step(), Step::Review);

        // Completing step 3 again must not advance past the terminal step.
        wizard.complete_step(StepData::Availability(availability()));
        assert_eq!(wizard.current_step(), Step::Review);
    }

    #[test]
    fn reset_clears_data_and_returns_to_step_one() {
        let mut wizard = SubmissionWizard::new();

        wizard.complete_step(StepData::BasicInfo(basic_info()));
        wizard.complete_step(StepData::ContactSocial(contact_social()));

        wizard.reset();

        assert_eq!(wizard.current_step(), Step::BasicInfo);
        assert!(wizard.basic_info().is_none());
        assert!(wizard.contact_social().is_none());
        assert!(wizard.availability().is_none());
    }

    #[test]
    fn submission_requires_all_steps() -> TestResult {
        let mut wizard = SubmissionWizard::new();

        assert_eq!(wizard.submission(), Err(WizardError::Incomplete));

        wizard.complete_step(StepData::BasicInfo(basic_info()));
        wizard.complete_step(StepData::ContactSocial(contact_social()));
        assert_eq!(wizard.submission(), Err(WizardError::Incomplete));

        wizard.complete_step(StepData::Availability(availability()));

        let submission = wizard.submission()?;
        assert_eq!(submission.basic_info, basic_info());
        assert_eq!(submission.availability, availability());

        Ok(())
    }

    #[test]
    fn step_completed_review_requires_every_payload() {
        let mut wizard = SubmissionWizard::new();

        wizard.complete_step(StepData::BasicInfo(basic_info()));
        wizard.complete_step(StepData::ContactSocial(contact_social()));

        assert!(wizard.step_completed(Step::BasicInfo));
        assert!(!wizard.step_completed(Step::Review));

        wizard.complete_step(StepData::Availability(availability()));
        assert!(wizard.step_completed(Step::Review));
    }

    #[test]
    fn serde_round_trip_preserves_progress() -> TestResult {
        let mut wizard = SubmissionWizard::new();

        wizard.complete_step(StepData::BasicInfo(basic_info()));
        wizard.complete_step(StepData::ContactSocial(contact_social()));

        let json = serde_json::to_string(&wizard)?;
        let restored: SubmissionWizard = serde_json::from_str(&json)?;

        assert_eq!(restored, wizard);
        assert_eq!(restored.current_step(), Step::Availability);

        Ok(())
    }

    #[test]
    fn step_numbers_are_one_based() {
        assert_eq!(Step::BasicInfo.number(), 1);
        assert_eq!(Step::ContactSocial.number(), 2);
        assert_eq!(Step::Availability.number(), 3);
        assert_eq!(Step::Review.number(), 4);
    }
}
