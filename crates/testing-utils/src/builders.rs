//! Test data builders for snapshot entities
//!
//! Builder patterns with sensible defaults and easy customization,
//! mirroring what the remote service would report.

use console_domain::{
    DateData, EnvironmentData, Job, JobGroup, NullableDate, SchedulerData, Status, Trigger,
};

pub fn date_data(ticks: i64) -> DateData {
    DateData {
        ticks,
        utc_date_str: format!("utc:{ticks}"),
        server_date_str: format!("server:{ticks}"),
    }
}

pub fn environment_data() -> EnvironmentData {
    EnvironmentData {
        self_version: "1.0.0".to_string(),
        scheduler_version: "2.6.1".to_string(),
        runtime_version: "4.0".to_string(),
        custom_css_url: None,
    }
}

/// Builder for scheduler snapshots; `jobs_total` is derived at build time
pub struct SchedulerDataBuilder {
    data: SchedulerData,
}

impl SchedulerDataBuilder {
    pub fn new() -> Self {
        Self {
            data: SchedulerData {
                name: "TestScheduler".to_string(),
                status: Status::Active,
                instance_id: "NON_CLUSTERED".to_string(),
                running_since: NullableDate::from(date_data(638412345678901234)),
                jobs_total: 0,
                jobs_executed: 0,
                can_start: false,
                can_shutdown: true,
                is_remote: false,
                scheduler_type_name: "StdScheduler".to_string(),
                job_groups: Vec::new(),
            },
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.data.name = name.to_string();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.data.status = status;
        self
    }

    pub fn with_group(mut self, group: JobGroup) -> Self {
        self.data.job_groups.push(group);
        self
    }

    pub fn with_jobs_executed(mut self, jobs_executed: u32) -> Self {
        self.data.jobs_executed = jobs_executed;
        self
    }

    /// A scheduler that has not been started yet
    pub fn stopped(mut self) -> Self {
        self.data.running_since = NullableDate::empty();
        self.data.can_start = true;
        self.data.can_shutdown = false;
        self
    }

    pub fn build(mut self) -> SchedulerData {
        self.data.jobs_total = self
            .data
            .job_groups
            .iter()
            .map(|group| group.jobs.len() as u32)
            .sum();
        self.data
    }
}

impl Default for SchedulerDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct JobGroupBuilder {
    group: JobGroup,
}

impl JobGroupBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            group: JobGroup {
                name: name.to_string(),
                status: Status::Active,
                can_start: false,
                can_pause: true,
                jobs: Vec::new(),
            },
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.group.status = status;
        self
    }

    pub fn with_permissions(mut self, can_start: bool, can_pause: bool) -> Self {
        self.group.can_start = can_start;
        self.group.can_pause = can_pause;
        self
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.group.jobs.push(job);
        self
    }

    pub fn build(self) -> JobGroup {
        self.group
    }
}

pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(group: &str, name: &str) -> Self {
        Self {
            job: Job {
                name: name.to_string(),
                status: Status::Active,
                can_start: false,
                can_pause: true,
                group_name: group.to_string(),
                unique_name: format!("{group}.{name}"),
                has_triggers: false,
                triggers: Vec::new(),
            },
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.job.status = status;
        self
    }

    pub fn with_permissions(mut self, can_start: bool, can_pause: bool) -> Self {
        self.job.can_start = can_start;
        self.job.can_pause = can_pause;
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.job.triggers.push(trigger);
        self.job.has_triggers = true;
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

pub struct TriggerBuilder {
    trigger: Trigger,
}

impl TriggerBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            trigger: Trigger {
                name: name.to_string(),
                status: Status::Active,
                can_start: false,
                can_pause: true,
                start_date: NullableDate::from(date_data(1)),
                end_date: NullableDate::empty(),
                next_fire_date: NullableDate::from(date_data(2)),
                previous_fire_date: NullableDate::empty(),
            },
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.trigger.status = status;
        self
    }

    pub fn with_next_fire_date(mut self, date: DateData) -> Self {
        self.trigger.next_fire_date = NullableDate::from(date);
        self
    }

    pub fn build(self) -> Trigger {
        self.trigger
    }
}

/// One group "DEFAULT" with two active jobs, the common fixture
pub fn sample_snapshot() -> SchedulerData {
    SchedulerDataBuilder::new()
        .with_group(
            JobGroupBuilder::new("DEFAULT")
                .with_job(
                    JobBuilder::new("DEFAULT", "cleanup")
                        .with_trigger(TriggerBuilder::new("cleanup-trigger").build())
                        .build(),
                )
                .with_job(JobBuilder::new("DEFAULT", "report").build())
                .build(),
        )
        .build()
}
