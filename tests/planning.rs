use std::collections::HashSet;

use u_courseplan::models::{Catalog, Course, CourseInfo, Prerequisites, RequirementSet, Semester};
use u_courseplan::scheduler::{PlanKpi, PlanOutcome, PlanRequest, Planner};
use u_courseplan::termination::{ExternalTermination, NeverTerminate};
use u_courseplan::{PlanError, PlannerConfig};

fn cs(designation: &str) -> Course {
    Course::new("CS", designation)
}

fn chain(len: usize) -> (Catalog, Vec<Course>) {
    let courses: Vec<Course> = (1..=len).map(|i| cs(&format!("{}", 1000 + i))).collect();
    let mut catalog = Catalog::new();
    for (i, course) in courses.iter().enumerate() {
        let mut info = CourseInfo::new(3).offered_always();
        if i > 0 {
            info = info.with_prerequisites(Prerequisites::all_of(vec![courses[i - 1].clone()]));
        }
        catalog.insert(course.clone(), info);
    }
    (catalog, courses)
}

#[test]
fn test_goal_already_completed() {
    let catalog = Catalog::new().with_course(cs("1101"), CourseInfo::new(3).offered_always());
    let request = PlanRequest::new(vec![cs("1101")]).with_completed(cs("1101"));
    let outcome = Planner::default().plan(&catalog, &request).unwrap();
    assert!(matches!(outcome, PlanOutcome::AlreadySatisfied));
}

#[test]
fn test_single_goal_placed_at_horizon() {
    let catalog = Catalog::new().with_course(cs("1101"), CourseInfo::new(3).offered_always());
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(vec![cs("1101")]))
        .unwrap();

    let plan = outcome.plan().unwrap();
    assert_eq!(plan.len(), 1);
    let entry = plan.get(&cs("1101")).unwrap();
    assert_eq!(entry.term.index, 11);
    assert_eq!(entry.term_label(), ("Spring", "Senior"));
    assert_eq!(entry.credits, 3);
    assert!(entry.prerequisites.is_empty());
}

#[test]
fn test_no_goals() {
    let catalog = Catalog::new().with_course(cs("1101"), CourseInfo::new(3).offered_always());
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::default())
        .unwrap();
    assert!(matches!(outcome, PlanOutcome::AlreadySatisfied));
}

#[test]
fn test_prerequisite_satisfied_by_completed() {
    let catalog = Catalog::new()
        .with_course(cs("1101"), CourseInfo::new(3).offered_always())
        .with_course(
            cs("2201"),
            CourseInfo::new(3)
                .offered_always()
                .with_prerequisites(Prerequisites::all_of(vec![cs("1101")])),
        );
    let request = PlanRequest::new(vec![cs("2201")]).with_completed(cs("1101"));
    let outcome = Planner::default().plan(&catalog, &request).unwrap();

    let plan = outcome.plan().unwrap();
    assert!(!plan.contains(&cs("1101")));
    let entry = plan.get(&cs("2201")).unwrap();
    assert_eq!(entry.prerequisites, RequirementSet::new(vec![cs("1101")]));
    assert_eq!(entry.satisfied_by_initial, vec![cs("1101")]);
}

#[test]
fn test_chain_longer_than_horizon_is_infeasible() {
    let (catalog, courses) = chain(12);
    let goal = courses[11].clone();
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(vec![goal]))
        .unwrap();
    assert!(matches!(outcome, PlanOutcome::Infeasible));
}

#[test]
fn test_chain_fits_horizon() {
    let (catalog, courses) = chain(11);
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(vec![courses[10].clone()]))
        .unwrap();
    let plan = outcome.plan().unwrap();
    for (i, course) in courses.iter().enumerate() {
        assert_eq!(plan.get(course).unwrap().term.index, i as u32 + 1);
    }
}

#[test]
fn test_without_summer_terms() {
    let (catalog, courses) = chain(3);
    let planner = Planner::new(PlannerConfig::default().with_summer_terms(false).with_max_terms(8))
        .unwrap();
    let outcome = planner
        .plan(&catalog, &PlanRequest::new(vec![courses[2].clone()]))
        .unwrap();
    let plan = outcome.plan().unwrap();
    let labels: Vec<_> = courses
        .iter()
        .map(|c| plan.get(c).unwrap().term_label())
        .collect();
    assert_eq!(
        labels,
        vec![("Spring", "Junior"), ("Fall", "Senior"), ("Spring", "Senior")]
    );
}

#[test]
fn test_aggregate_bucket_allows_same_term() {
    let major = Course::new("CS", "major");
    let catalog = Catalog::new()
        .with_course(cs("1101"), CourseInfo::new(3).offered_always())
        .with_course(cs("1151"), CourseInfo::new(3).offered_always())
        .with_course(
            major.clone(),
            CourseInfo::new(0)
                .offered_always()
                .with_prerequisites(Prerequisites::any_of(vec![
                    RequirementSet::new(vec![cs("1101"), cs("1151")]),
                    RequirementSet::new(vec![cs("1101")]),
                ])),
        );
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(vec![major.clone()]))
        .unwrap();
    let plan = outcome.plan().unwrap();

    let bucket = plan.get(&major).unwrap();
    // Lower leading-digit sum explored first
    assert_eq!(bucket.prerequisites, RequirementSet::new(vec![cs("1101")]));
    assert_eq!(bucket.credits, 0);
    assert_eq!(plan.get(&cs("1101")).unwrap().term.index, bucket.term.index);
}

#[test]
fn test_cycle_through_real_courses_is_infeasible() {
    let catalog = Catalog::new()
        .with_course(
            cs("1101"),
            CourseInfo::new(3)
                .offered_always()
                .with_prerequisites(Prerequisites::all_of(vec![cs("2201")])),
        )
        .with_course(
            cs("2201"),
            CourseInfo::new(3)
                .offered_always()
                .with_prerequisites(Prerequisites::all_of(vec![cs("1101")])),
        );
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(vec![cs("2201")]))
        .unwrap();
    assert!(matches!(outcome, PlanOutcome::Infeasible));
}

#[test]
fn test_cycle_in_unused_alternative_still_plans() {
    let catalog = Catalog::new()
        .with_course(cs("1101"), CourseInfo::new(3).offered_always())
        .with_course(
            cs("2201"),
            CourseInfo::new(3)
                .offered_always()
                .with_prerequisites(Prerequisites::any_of(vec![
                    RequirementSet::new(vec![cs("3251")]),
                    RequirementSet::new(vec![cs("1101")]),
                ])),
        )
        .with_course(
            cs("3251"),
            CourseInfo::new(3)
                .offered_always()
                .with_prerequisites(Prerequisites::all_of(vec![cs("2201")])),
        );
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(vec![cs("2201")]))
        .unwrap();
    let plan = outcome.plan().unwrap();
    let entry = plan.get(&cs("2201")).unwrap();
    assert_eq!(entry.prerequisites, RequirementSet::new(vec![cs("1101")]));
    assert!(plan.get(&cs("1101")).unwrap().term.index < entry.term.index);
}

#[test]
fn test_bucket_cycle_rejected() {
    let major = Course::new("CS", "major");
    let core = Course::new("CS", "core");
    let catalog = Catalog::new()
        .with_course(
            major.clone(),
            CourseInfo::new(0)
                .offered_always()
                .with_prerequisites(Prerequisites::all_of(vec![core.clone()])),
        )
        .with_course(
            core,
            CourseInfo::new(0)
                .offered_always()
                .with_prerequisites(Prerequisites::all_of(vec![major.clone()])),
        );
    let err = Planner::default()
        .plan(&catalog, &PlanRequest::new(vec![major]))
        .unwrap_err();
    assert!(matches!(err, PlanError::CyclicPrerequisite(_)));
}

#[test]
fn test_shared_prerequisite_of_course_and_bucket() {
    let major = Course::new("CS", "major");
    let catalog = Catalog::new()
        .with_course(cs("1101"), CourseInfo::new(3).offered_always())
        .with_course(
            cs("2201"),
            CourseInfo::new(3)
                .offered_always()
                .with_prerequisites(Prerequisites::all_of(vec![cs("1101")])),
        )
        .with_course(
            major.clone(),
            CourseInfo::new(0)
                .offered_always()
                .with_prerequisites(Prerequisites::all_of(vec![cs("1101")])),
        );
    let report = Planner::default()
        .solve(
            &catalog,
            &PlanRequest::new(vec![cs("2201"), major.clone()]),
            &NeverTerminate,
        )
        .unwrap();
    assert!(report.violations.is_empty());

    let plan = report.outcome.plan().unwrap();
    let intro = plan.get(&cs("1101")).unwrap().term.index;
    assert!(intro < plan.get(&cs("2201")).unwrap().term.index);
    assert!(intro <= plan.get(&major).unwrap().term.index);
}

#[test]
fn test_goals_exceeding_credit_ceilings_are_infeasible() {
    // One 10-credit course per regular term; summers never fit them
    let goals: Vec<Course> = (1..=9).map(|i| cs(&format!("{}", 4000 + i))).collect();
    let catalog: Catalog = goals
        .iter()
        .map(|c| {
            let info = CourseInfo::new(10)
                .offered_in(Semester::Fall)
                .offered_in(Semester::Spring);
            (c.clone(), info)
        })
        .collect();

    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(goals.clone()))
        .unwrap();
    assert!(matches!(outcome, PlanOutcome::Infeasible));

    // Eight regular terms hold eight of them
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(goals[..8].to_vec()))
        .unwrap();
    let plan = outcome.plan().unwrap();
    assert_eq!(plan.terms().len(), 8);
    assert!(plan.terms().iter().all(|t| t.credits == 10));
}

#[test]
fn test_external_cancellation() {
    let (catalog, courses) = chain(4);
    let flag = std::sync::atomic::AtomicBool::new(true);
    let err = Planner::default()
        .plan_until(
            &catalog,
            &PlanRequest::new(vec![courses[3].clone()]),
            &ExternalTermination::new(&flag),
        )
        .unwrap_err();
    assert!(matches!(err, PlanError::Cancelled { .. }));
}

#[test]
fn test_fill_tops_up_terms() {
    let mut catalog = Catalog::new().with_course(
        cs("2201"),
        CourseInfo::new(3)
            .offered_in(Semester::Spring)
            .with_prerequisites(Prerequisites::all_of(vec![cs("1101")])),
    );
    catalog.insert(cs("1101"), CourseInfo::new(3).offered_always());
    for (program, credits) in [("ANTH", 3), ("ARTS", 4), ("BIO", 4), ("CHEM", 3), ("ECON", 3)] {
        catalog.insert(Course::new(program, "1100"), CourseInfo::new(credits).offered_always());
    }
    let planner = Planner::default();
    let outcome = planner
        .plan(&catalog, &PlanRequest::new(vec![cs("2201")]))
        .unwrap();
    let plan = outcome.plan().unwrap();

    let kpi = PlanKpi::calculate(plan, planner.calendar());
    assert_eq!(kpi.terms_used, 2);
    assert_eq!(filler_count(plan), 5);
    // Terms fill in chronological order; term 11 gets what is left
    assert_eq!(kpi.credits_by_term[&10], 14);
    assert_eq!(kpi.credits_by_term[&11], 9);
    assert_eq!(kpi.underfilled_terms, vec![11]);
}

fn filler_count(plan: &u_courseplan::CoursePlan) -> usize {
    plan.courses().filter(|c| c.course.program != "CS").count()
}

#[test]
fn test_config_from_toml() {
    let config = PlannerConfig::from_toml_str(
        r#"
        include_summer_terms = true
        max_terms = 12

        [summer]
        floor = 0
        ceiling = 9
        "#,
    )
    .unwrap();
    let planner = Planner::new(config).unwrap();
    assert_eq!(planner.calendar().horizon(), 12);
    assert_eq!(planner.calendar().ceiling(3), 9);
    assert_eq!(planner.calendar().ceiling(1), 18);

    let err = PlannerConfig::from_toml_str("max_terms = 13").unwrap_err();
    assert!(err.to_string().contains("max_terms"));
}

#[test]
fn test_catalog_json_round_trip() {
    let catalog = Catalog::new()
        .with_course(
            cs("2201"),
            CourseInfo::new(3)
                .offered_in(Semester::Fall)
                .with_prerequisites(Prerequisites::any_of(vec![
                    RequirementSet::new(vec![cs("1101")]),
                    RequirementSet::new(vec![cs("1151")]),
                ])),
        )
        .with_course(cs("1101"), CourseInfo::new(3).offered_always());

    let json = serde_json::to_string(&catalog).unwrap();
    let back: Catalog = serde_json::from_str(&json).unwrap();
    let order: Vec<_> = back.iter().map(|(c, _)| c.clone()).collect();
    assert_eq!(order, vec![cs("2201"), cs("1101")]);
    assert_eq!(back.get(&cs("2201")), catalog.get(&cs("2201")));
}

#[test]
fn test_outcome_json() {
    let catalog = Catalog::new().with_course(cs("1101"), CourseInfo::new(3).offered_always());
    let outcome = Planner::default()
        .plan(&catalog, &PlanRequest::new(vec![cs("1101")]))
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json.get("scheduled").is_some());

    let request: PlanRequest =
        serde_json::from_str(r#"{"goals": [{"program": "CS", "designation": "1101"}]}"#).unwrap();
    assert!(request.completed.is_empty());
    assert_eq!(request.goals, vec![cs("1101")]);
}

#[test]
fn test_completed_course_never_planned() {
    let catalog = Catalog::new()
        .with_course(cs("1101"), CourseInfo::new(3).offered_always())
        .with_course(cs("2201"), CourseInfo::new(3).offered_always());
    let request = PlanRequest::new(vec![cs("2201")]).with_completed(cs("1101"));
    let outcome = Planner::default().plan(&catalog, &request).unwrap();
    let plan = outcome.plan().unwrap();
    let planned: HashSet<_> = plan.courses().map(|c| c.course.clone()).collect();
    assert!(!planned.contains(&cs("1101")));
}
