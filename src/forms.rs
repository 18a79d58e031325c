//! The site's forms.

use crate::core::field::{FieldSpec, SelectOption};
use crate::core::schema::FormSchema;
use crate::donation::{AmountRule, PresetAmount};
use crate::visibility::{CurrentUrlProvider, project_id_from_url};

pub const NAMES: [&str; 5] = [
    "contact",
    "volunteer",
    "event-registration",
    "donation",
    "project-donation",
];

pub fn by_name(name: &str) -> Option<FormSchema> {
    match name {
        "contact" => Some(contact()),
        "volunteer" => Some(volunteer()),
        "event-registration" => Some(event_registration()),
        "donation" => Some(donation()),
        "project-donation" => Some(project_donation(ProjectContext::default())),
        _ => None,
    }
}

pub fn contact() -> FormSchema {
    FormSchema::new("contact", "Contact us")
        .with_endpoint("contact-messages")
        .with_field(FieldSpec::text("name", "Name"))
        .with_field(FieldSpec::email("email", "Email"))
        .with_field(FieldSpec::text("subject", "Subject"))
        .with_field(FieldSpec::text("message", "Message"))
        .with_success_message("Thank you for your message! We will get back to you soon.")
        .with_failure_message("Sorry, there was an error sending your message. Please try again.")
}

pub fn volunteer() -> FormSchema {
    FormSchema::new("volunteer", "Volunteer sign-up")
        .with_endpoint("volunteers")
        .with_field(FieldSpec::text("name", "Name"))
        .with_field(FieldSpec::email("email", "Email"))
        .with_field(
            FieldSpec::text("skills", "Skills")
                .with_required_message("Please describe your skills or interests"),
        )
        .with_field(
            FieldSpec::selection(
                "availability",
                "Availability",
                vec![
                    SelectOption::new("Full-time"),
                    SelectOption::new("Part-time"),
                    SelectOption::new("Occasional"),
                ],
            )
            .with_required_message("Please select your availability"),
        )
        .with_success_message("Thank you for volunteering! We will contact you soon.")
        .with_failure_message("Something went wrong. Please try again.")
}

pub fn event_registration() -> FormSchema {
    FormSchema::new("event-registration", "Event registration")
        .with_endpoint("registrations")
        .with_field(FieldSpec::text("name", "Name"))
        .with_field(FieldSpec::email("email", "Email"))
        .with_field(FieldSpec::selection(
            "event",
            "Event",
            vec![
                SelectOption::new("Fundraiser Gala").with_label("Annual Fundraiser Gala"),
                SelectOption::new("Volunteer Workshop").with_label("Community Volunteer Workshop"),
                SelectOption::new("Awareness Campaign")
                    .with_label("Global Awareness Campaign Launch"),
            ],
        ))
        .with_success_message(
            "Thank you, {name}! You've been registered for {event}. \
             We'll send confirmation details to {email}.",
        )
        .with_failure_message(
            "Sorry, there was an error processing your registration. Please try again.",
        )
}

pub fn donation() -> FormSchema {
    let presets = [10, 25, 50, 100].into_iter().map(PresetAmount::new).collect();

    FormSchema::new("donation", "Donate")
        .with_endpoint("donations")
        .with_field(FieldSpec::donation_amount(
            "amount",
            "Donation amount",
            presets,
            AmountRule::general(),
        ))
        .with_success_message("Thank you! Your donation of {amount} is being processed.")
        .with_failure_message("Sorry, we could not process your donation. Please try again.")
}

/// The project a donation page belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub title: String,
    pub project_id: Option<String>,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self::new("this project")
    }
}

impl ProjectContext {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project_id: None,
        }
    }

    pub fn with_project_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self
    }

    pub fn from_url(title: impl Into<String>, provider: &dyn CurrentUrlProvider) -> Self {
        Self {
            title: title.into(),
            project_id: project_id_from_url(provider),
        }
    }
}

pub fn project_presets() -> Vec<PresetAmount> {
    vec![
        PresetAmount::new(10).with_impact("provides clean water for 5 people"),
        PresetAmount::new(25).with_impact("feeds a family for 3 days"),
        PresetAmount::new(50).with_impact("supplies medical care for 2 children"),
        PresetAmount::new(100).with_impact("builds a school desk for 4 students"),
    ]
}

pub fn project_donation(project: ProjectContext) -> FormSchema {
    let mut schema = FormSchema::new("project-donation", "Support this project")
        .with_endpoint("donations")
        .with_field(FieldSpec::donation_amount(
            "amount",
            "Donation amount",
            project_presets(),
            AmountRule::project(),
        ))
        .with_success_message(
            "Thank you for your ${amount} donation to {project}! \
             This is a mock submission for MVP.",
        )
        .with_failure_message("Sorry, we could not process your donation. Please try again.")
        .with_context("project", project.title);

    if let Some(id) = project.project_id {
        schema = schema.with_context("project_id", id);
    }
    schema
}
