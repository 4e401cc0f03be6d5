//! Booking-flow step eligibility.
//!
//! The flow is service → formula → schedule → location → options → animals →
//! summary. Which steps are shown, and whether the client may move past one,
//! are pure functions of the selection and the catalog data.

use serde::{Deserialize, Serialize};

use crate::availability::{has_capacity_for, is_day_selectable};
use crate::models::{
    AnimalType, BookingSelection, CalendarEntry, FormuleData, LocationMode, PricingMode,
    ServiceData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Service,
    Formule,
    Schedule,
    Location,
    Options,
    Animals,
    Summary,
}

const ALL_STEPS: [BookingStep; 7] = [
    BookingStep::Service,
    BookingStep::Formule,
    BookingStep::Schedule,
    BookingStep::Location,
    BookingStep::Options,
    BookingStep::Animals,
    BookingStep::Summary,
];

/// Why the client cannot leave a step yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StepBlocker {
    #[error("no service selected")]
    NoService,
    #[error("no formula selected")]
    NoFormule,
    #[error("formula {formule_id} is not offered by this service")]
    UnknownFormule { formule_id: String },
    #[error("no start date selected")]
    NoStartDate,
    #[error("end date is before start date")]
    EndBeforeStart,
    #[error("start and end times are required")]
    MissingTimes,
    #[error("end time must be after start time")]
    EndTimeBeforeStart,
    #[error("{date} cannot be booked")]
    DayNotSelectable { date: chrono::NaiveDate },
    #[error("no collective session selected")]
    NoCollectiveSlot,
    #[error("choose where the service takes place")]
    NoLocation,
    #[error("this formula is not offered at that location")]
    LocationNotOffered,
    #[error("an address is required for a service at home")]
    NoAddress,
    #[error("option {option_id} is not offered by this service")]
    UnknownOption { option_id: String },
    #[error("at least one animal is required")]
    NoAnimals,
    #[error("{species:?} is not accepted by this formula")]
    SpeciesNotAccepted { species: AnimalType },
    #[error("only {remaining} places left for {requested} animals")]
    CapacityExceeded { requested: u32, remaining: u32 },
}

/// Everything step eligibility looks at
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub service: Option<&'a ServiceData>,
    pub selection: &'a BookingSelection,
    /// Calendar of the selected service, may be empty when not loaded yet
    pub calendar: &'a [CalendarEntry],
}

impl<'a> StepContext<'a> {
    pub fn formule(&self) -> Option<&'a FormuleData> {
        let id = self.selection.formule_id.as_deref()?;
        self.service?.formule(id)
    }

    fn calendar_entry(&self, date: chrono::NaiveDate) -> Option<&'a CalendarEntry> {
        self.calendar.iter().find(|entry| entry.date == date)
    }
}

/// Steps shown for the current service and formula.
///
/// Location is asked only when the formula does not fix it or needs a client
/// address; options only when the service has any.
pub fn visible_steps(service: Option<&ServiceData>, formule: Option<&FormuleData>) -> Vec<BookingStep> {
    ALL_STEPS
        .iter()
        .copied()
        .filter(|step| match step {
            BookingStep::Location => {
                formule.map_or(true, |f| f.location != LocationMode::AnnouncerHome)
            }
            BookingStep::Options => service.map_or(true, |s| !s.options.is_empty()),
            _ => true,
        })
        .collect()
}

pub fn next_step(current: BookingStep, ctx: &StepContext<'_>) -> Option<BookingStep> {
    visible_steps(ctx.service, ctx.formule())
        .into_iter()
        .find(|step| *step > current)
}

pub fn previous_step(current: BookingStep, ctx: &StepContext<'_>) -> Option<BookingStep> {
    visible_steps(ctx.service, ctx.formule())
        .into_iter()
        .rev()
        .find(|step| *step < current)
}

/// First visible step that still blocks, i.e. what keeps the summary from submitting
pub fn first_blocked_step(ctx: &StepContext<'_>) -> Option<(BookingStep, StepBlocker)> {
    visible_steps(ctx.service, ctx.formule())
        .into_iter()
        .filter(|step| *step != BookingStep::Summary)
        .find_map(|step| can_proceed(step, ctx).err().map(|blocker| (step, blocker)))
}

/// Check whether the client may leave `step`
pub fn can_proceed(step: BookingStep, ctx: &StepContext<'_>) -> Result<(), StepBlocker> {
    match step {
        BookingStep::Service => ctx.service.map(|_| ()).ok_or(StepBlocker::NoService),
        BookingStep::Formule => require_formule(ctx).map(|_| ()),
        BookingStep::Schedule => check_schedule(ctx),
        BookingStep::Location => check_location(ctx),
        BookingStep::Options => check_options(ctx),
        BookingStep::Animals => check_animals(ctx),
        BookingStep::Summary => match first_blocked_step(ctx) {
            Some((_, blocker)) => Err(blocker),
            None => Ok(()),
        },
    }
}

fn require_service<'a>(ctx: &StepContext<'a>) -> Result<&'a ServiceData, StepBlocker> {
    ctx.service.ok_or(StepBlocker::NoService)
}

fn require_formule<'a>(ctx: &StepContext<'a>) -> Result<&'a FormuleData, StepBlocker> {
    let service = require_service(ctx)?;
    let formule_id = ctx
        .selection
        .formule_id
        .as_deref()
        .ok_or(StepBlocker::NoFormule)?;
    service
        .formule(formule_id)
        .ok_or_else(|| StepBlocker::UnknownFormule {
            formule_id: formule_id.to_string(),
        })
}

fn check_schedule(ctx: &StepContext<'_>) -> Result<(), StepBlocker> {
    let service = require_service(ctx)?;
    let formule = require_formule(ctx)?;
    let selection = ctx.selection;

    if formule.is_collective {
        return if selection.collective_slot_ids.is_empty() {
            Err(StepBlocker::NoCollectiveSlot)
        } else {
            Ok(())
        };
    }

    let start = selection.start_date.ok_or(StepBlocker::NoStartDate)?;
    let end = selection.end_date.unwrap_or(start);
    if end < start {
        return Err(StepBlocker::EndBeforeStart);
    }

    // Unknown dates are not blocked: the calendar may not be loaded
    let blocked = ctx
        .calendar
        .iter()
        .filter(|entry| start <= entry.date && entry.date <= end && !is_day_selectable(entry))
        .map(|entry| entry.date)
        .min();
    if let Some(date) = blocked {
        return Err(StepBlocker::DayNotSelectable { date });
    }

    // Punctual services need clock times; fixed-duration ones only a start
    if service.pricing_mode() == PricingMode::Punctual {
        let fixed_duration = service.enable_duration_based_blocking && formule.duration_minutes.is_some();
        match (selection.start_time, selection.end_time) {
            (None, _) => return Err(StepBlocker::MissingTimes),
            (Some(_), None) if !fixed_duration => return Err(StepBlocker::MissingTimes),
            (Some(s), Some(e)) if !fixed_duration && start == end && e <= s => {
                return Err(StepBlocker::EndTimeBeforeStart)
            }
            _ => {}
        }
    }

    Ok(())
}

fn check_location(ctx: &StepContext<'_>) -> Result<(), StepBlocker> {
    let formule = require_formule(ctx)?;
    let location = match (formule.location, ctx.selection.location) {
        (LocationMode::Both, None) => return Err(StepBlocker::NoLocation),
        (LocationMode::Both, Some(LocationMode::Both)) => return Err(StepBlocker::NoLocation),
        (LocationMode::Both, Some(chosen)) => chosen,
        (fixed, Some(chosen)) if chosen != fixed => return Err(StepBlocker::LocationNotOffered),
        (fixed, _) => fixed,
    };

    if location == LocationMode::ClientHome && ctx.selection.address_id.is_none() {
        return Err(StepBlocker::NoAddress);
    }
    Ok(())
}

fn check_options(ctx: &StepContext<'_>) -> Result<(), StepBlocker> {
    let service = require_service(ctx)?;
    match ctx
        .selection
        .option_ids
        .iter()
        .find(|id| service.option(id).is_none())
    {
        Some(id) => Err(StepBlocker::UnknownOption {
            option_id: id.clone(),
        }),
        None => Ok(()),
    }
}

fn check_animals(ctx: &StepContext<'_>) -> Result<(), StepBlocker> {
    let formule = require_formule(ctx)?;
    let selection = ctx.selection;
    let requested = selection.effective_animal_count();
    if requested == 0 {
        return Err(StepBlocker::NoAnimals);
    }

    if let Some(animal) = selection.animals.iter().find(|a| !formule.accepts(a.species)) {
        return Err(StepBlocker::SpeciesNotAccepted {
            species: animal.species,
        });
    }

    if let Some(capacity) = formule.capacity {
        if requested > capacity {
            return Err(StepBlocker::CapacityExceeded {
                requested,
                remaining: capacity,
            });
        }
    }

    if let Some(entry) = selection.start_date.and_then(|d| ctx.calendar_entry(d)) {
        if !has_capacity_for(entry, requested) {
            return Err(StepBlocker::CapacityExceeded {
                requested,
                remaining: entry.remaining_capacity.unwrap_or(0),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Animal, DayStatus, OptionData};
    use crate::testing::{self, date, time};

    fn walk_service() -> ServiceData {
        let mut formule = testing::formule("walk");
        formule.price = 1500;
        formule.location = LocationMode::ClientHome;
        formule.accepted_animals = vec![AnimalType::Dog];
        let mut service = testing::service("svc", "promenade");
        service.formules.push(formule);
        service
    }

    fn complete_selection() -> BookingSelection {
        BookingSelection {
            service_id: Some("svc".to_string()),
            formule_id: Some("walk".to_string()),
            start_date: Some(date(2026, 9, 1)),
            start_time: Some(time("10:00")),
            end_time: Some(time("11:00")),
            address_id: Some("addr-1".to_string()),
            animals: vec![Animal {
                id: "a1".to_string(),
                name: "Rex".to_string(),
                species: AnimalType::Dog,
            }],
            ..Default::default()
        }
    }

    fn ctx<'a>(service: &'a ServiceData, selection: &'a BookingSelection) -> StepContext<'a> {
        StepContext {
            service: Some(service),
            selection,
            calendar: &[],
        }
    }

    #[test]
    fn test_visible_steps_skip_location_and_options() {
        let mut service = walk_service();
        service.formules[0].location = LocationMode::AnnouncerHome;
        let steps = visible_steps(Some(&service), service.formule("walk"));
        assert_eq!(
            steps,
            vec![
                BookingStep::Service,
                BookingStep::Formule,
                BookingStep::Schedule,
                BookingStep::Animals,
                BookingStep::Summary
            ]
        );

        service.options.push(OptionData {
            id: "o".to_string(),
            name: String::new(),
            price: 200,
        });
        assert!(visible_steps(Some(&service), service.formule("walk")).contains(&BookingStep::Options));
    }

    #[test]
    fn test_next_and_previous_step() {
        let service = walk_service();
        let selection = complete_selection();
        let c = ctx(&service, &selection);

        assert_eq!(next_step(BookingStep::Schedule, &c), Some(BookingStep::Location));
        assert_eq!(next_step(BookingStep::Location, &c), Some(BookingStep::Animals));
        assert_eq!(previous_step(BookingStep::Animals, &c), Some(BookingStep::Location));
        assert_eq!(next_step(BookingStep::Summary, &c), None);
    }

    #[test]
    fn test_complete_selection_can_submit() {
        let service = walk_service();
        let selection = complete_selection();
        assert_eq!(can_proceed(BookingStep::Summary, &ctx(&service, &selection)), Ok(()));
    }

    #[test]
    fn test_schedule_blockers() {
        let service = walk_service();

        let mut selection = complete_selection();
        selection.end_time = None;
        assert_eq!(
            can_proceed(BookingStep::Schedule, &ctx(&service, &selection)),
            Err(StepBlocker::MissingTimes)
        );

        let mut selection = complete_selection();
        selection.end_time = Some(time("09:00"));
        assert_eq!(
            can_proceed(BookingStep::Schedule, &ctx(&service, &selection)),
            Err(StepBlocker::EndTimeBeforeStart)
        );

        let selection = complete_selection();
        let calendar = vec![CalendarEntry::new(date(2026, 9, 1), DayStatus::Unavailable)];
        let c = StepContext {
            service: Some(&service),
            selection: &selection,
            calendar: &calendar,
        };
        assert_eq!(
            can_proceed(BookingStep::Schedule, &c),
            Err(StepBlocker::DayNotSelectable {
                date: date(2026, 9, 1)
            })
        );
    }

    #[test]
    fn test_long_range_checks_only_known_days() {
        let service = walk_service();
        let mut selection = complete_selection();
        selection.end_date = Some(date(200_000, 1, 1));
        let calendar = vec![
            CalendarEntry::new(date(2026, 9, 20), DayStatus::Past),
            CalendarEntry::new(date(2026, 9, 5), DayStatus::Unavailable),
            CalendarEntry::new(date(2026, 8, 1), DayStatus::Unavailable),
            CalendarEntry::new(date(2026, 9, 2), DayStatus::Available),
        ];
        let c = StepContext {
            service: Some(&service),
            selection: &selection,
            calendar: &calendar,
        };
        assert_eq!(
            can_proceed(BookingStep::Schedule, &c),
            Err(StepBlocker::DayNotSelectable {
                date: date(2026, 9, 5)
            })
        );

        let open = vec![CalendarEntry::new(date(2026, 9, 2), DayStatus::Available)];
        let c = StepContext {
            calendar: &open,
            ..c
        };
        assert_eq!(can_proceed(BookingStep::Schedule, &c), Ok(()));
    }

    #[test]
    fn test_client_home_requires_address() {
        let service = walk_service();
        let mut selection = complete_selection();
        selection.address_id = None;
        assert_eq!(
            can_proceed(BookingStep::Location, &ctx(&service, &selection)),
            Err(StepBlocker::NoAddress)
        );
        assert_eq!(
            first_blocked_step(&ctx(&service, &selection)),
            Some((BookingStep::Location, StepBlocker::NoAddress))
        );
    }

    #[test]
    fn test_both_locations_need_a_choice() {
        let mut service = walk_service();
        service.formules[0].location = LocationMode::Both;
        let mut selection = complete_selection();
        assert_eq!(
            can_proceed(BookingStep::Location, &ctx(&service, &selection)),
            Err(StepBlocker::NoLocation)
        );

        selection.location = Some(LocationMode::AnnouncerHome);
        selection.address_id = None;
        assert_eq!(can_proceed(BookingStep::Location, &ctx(&service, &selection)), Ok(()));
    }

    #[test]
    fn test_animal_species_and_capacity() {
        let mut service = walk_service();
        let mut selection = complete_selection();
        selection.animals.push(Animal {
            id: "a2".to_string(),
            name: "Felix".to_string(),
            species: AnimalType::Cat,
        });
        assert_eq!(
            can_proceed(BookingStep::Animals, &ctx(&service, &selection)),
            Err(StepBlocker::SpeciesNotAccepted {
                species: AnimalType::Cat
            })
        );

        service.formules[0].accepted_animals.clear();
        service.formules[0].capacity = Some(1);
        assert_eq!(
            can_proceed(BookingStep::Animals, &ctx(&service, &selection)),
            Err(StepBlocker::CapacityExceeded {
                requested: 2,
                remaining: 1
            })
        );
    }

    #[test]
    fn test_collective_needs_slot() {
        let mut service = walk_service();
        service.formules[0].is_collective = true;
        let mut selection = complete_selection();
        assert_eq!(
            can_proceed(BookingStep::Schedule, &ctx(&service, &selection)),
            Err(StepBlocker::NoCollectiveSlot)
        );
        selection.collective_slot_ids.push("slot-1".to_string());
        assert_eq!(can_proceed(BookingStep::Schedule, &ctx(&service, &selection)), Ok(()));
    }

    #[test]
    fn test_missing_service_and_formule() {
        let selection = BookingSelection::default();
        let c = StepContext {
            service: None,
            selection: &selection,
            calendar: &[],
        };
        assert_eq!(can_proceed(BookingStep::Service, &c), Err(StepBlocker::NoService));

        let service = walk_service();
        assert_eq!(
            can_proceed(BookingStep::Formule, &ctx(&service, &selection)),
            Err(StepBlocker::NoFormule)
        );
    }
}
