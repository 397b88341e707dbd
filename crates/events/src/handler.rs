/// Decide and apply in one step.
///
/// Runs `handle` against the current state and, only when it succeeds, folds
/// every returned event into the aggregate. A rejected command leaves the
/// aggregate untouched. Returns the applied events so the caller can publish
/// them.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: lodgeops_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}
