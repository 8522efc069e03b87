//! 阶段同步 (Stage Synchronizer)
//!
//! 由成员的课程进度推导其 stage_role。只在管理员显式触发 "同步" 时
//! 执行，平时允许漂移 (录入阶段和实际进度不一致不报错)。
//!
//! 规则 (阶梯自下而上):
//!
//! | 条件 | 推导阶段 |
//! |------|----------|
//! | 没有任何 > 0% 的进度 | untrained |
//! | 动过课程但第一阶段未全 100% | early_training |
//! | 阶段 1 全 100%，阶段 2 未满 | part1_complete |
//! | 阶段 1-2 全 100%，阶段 3 未满 | part2_complete |
//! | 阶段 1-3 全 100% | part3_complete |
//!
//! "全 100%" 要求该阶段及其之前所有阶段的每门课程都是 100%。
//! 没有进度记录的课程按 0% 计 (显式查表默认值，见 [`percent_of`])。
//!
//! 两类成员不按阶梯走：
//! - 管理阶层 (full_member 及以上)：同步永不触碰、永不降级；
//! - pre_exam：课程未满阶段 3 时只进 warnings 供人工复核，不改动。

use shared::models::{Course, Member, StageRole};
use std::collections::{BTreeMap, HashMap};

/// 课程目录按 code 整数前缀切成的有序阶段表
#[derive(Debug, Clone, Default)]
pub struct CatalogParts {
    /// part -> 该阶段的课程 id (BTreeMap 保证阶段有序)
    parts: BTreeMap<u32, Vec<i64>>,
}

impl CatalogParts {
    /// 按 `code` 前缀分组；code 解析不出阶段的课程跳过 (录入错误)
    pub fn from_courses(courses: &[Course]) -> Self {
        let mut parts: BTreeMap<u32, Vec<i64>> = BTreeMap::new();
        for course in courses {
            if let Some(part) = course.part() {
                parts.entry(part).or_default().push(course.id);
            }
        }
        Self { parts }
    }

    /// 阶段 `part` 的课程 id (没有该阶段时为空)
    pub fn courses_of(&self, part: u32) -> &[i64] {
        self.parts.get(&part).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 阶段 1..=part 的所有课程是否对该成员全部 100%
    ///
    /// 目录里不存在的阶段按空集处理 (视为完成)。
    pub fn complete_through(&self, part: u32, progress: &HashMap<i64, i64>) -> bool {
        (1..=part).all(|p| {
            self.courses_of(p)
                .iter()
                .all(|course_id| percent_of(progress, *course_id) == 100)
        })
    }
}

/// 进度查表，没有记录 = 0%
///
/// "缺行即 0%" 的语义集中在这一个函数里，与显式 0% 记录完全等价。
fn percent_of(progress: &HashMap<i64, i64>, course_id: i64) -> i64 {
    progress.get(&course_id).copied().unwrap_or(0)
}

/// 从进度推导成员应处的阶段 (不考虑管理阶层/pre_exam 的豁免)
pub fn computed_stage(parts: &CatalogParts, progress: &HashMap<i64, i64>) -> StageRole {
    let touched = progress.values().any(|p| *p > 0);
    if !touched {
        return StageRole::Untrained;
    }
    if !parts.complete_through(1, progress) {
        return StageRole::EarlyTraining;
    }
    if !parts.complete_through(2, progress) {
        return StageRole::Part1Complete;
    }
    if !parts.complete_through(3, progress) {
        return StageRole::Part2Complete;
    }
    StageRole::Part3Complete
}

/// 一次同步的计划：要改谁、要提示谁
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    /// (member_id, 新阶段)，只含实际会变化的成员
    pub changed: Vec<(i64, StageRole)>,
    /// pre_exam 但课程未满阶段 3 的成员 (仅提示，不改动)
    pub warnings: Vec<i64>,
}

/// 对一批成员计算同步计划 (纯函数，幂等)
///
/// `progress_by_member` 里缺席的成员按全 0% 处理。
pub fn plan_sync(
    members: &[Member],
    parts: &CatalogParts,
    progress_by_member: &HashMap<i64, HashMap<i64, i64>>,
) -> SyncPlan {
    let empty = HashMap::new();
    let mut plan = SyncPlan::default();

    for member in members {
        // 管理阶层：永不触碰
        if member.stage_role.is_staff_level() {
            continue;
        }

        let progress = progress_by_member.get(&member.id).unwrap_or(&empty);

        // 考核预备：只提示，不改动
        if member.stage_role == StageRole::PreExam {
            if !parts.complete_through(3, progress) {
                plan.warnings.push(member.id);
            }
            continue;
        }

        let computed = computed_stage(parts, progress);
        if computed != member.stage_role {
            plan.changed.push((member.id, computed));
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MemberStatus;

    fn course(id: i64, code: &str) -> Course {
        Course {
            id,
            code: code.to_string(),
            name: format!("课程 {code}"),
            category: "训练".to_string(),
            difficulty: None,
            hours: None,
            sort_order: id,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn member(id: i64, stage: StageRole) -> Member {
        Member {
            id,
            nickname: format!("member-{id}"),
            qq: format!("10000{id}"),
            stage_role: stage,
            status: MemberStatus::Normal,
            last_training_date: None,
            join_date: None,
            reminder_timeout_days: None,
            notes: None,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// 阶段 1: 5 门, 阶段 2: 3 门, 阶段 3: 2 门
    fn catalog() -> CatalogParts {
        let courses = vec![
            course(11, "1.1"),
            course(12, "1.2"),
            course(13, "1.3"),
            course(14, "1.4"),
            course(15, "1.5"),
            course(21, "2.1"),
            course(22, "2.2"),
            course(23, "2.3"),
            course(31, "3.1"),
            course(32, "3.2"),
        ];
        CatalogParts::from_courses(&courses)
    }

    fn progress(entries: &[(i64, i64)]) -> HashMap<i64, i64> {
        entries.iter().copied().collect()
    }

    fn all_at_100(ids: &[i64]) -> Vec<(i64, i64)> {
        ids.iter().map(|id| (*id, 100)).collect()
    }

    #[test]
    fn no_progress_is_untrained() {
        assert_eq!(
            computed_stage(&catalog(), &progress(&[])),
            StageRole::Untrained
        );
    }

    #[test]
    fn explicit_zero_entries_equal_missing_entries() {
        // 显式 0% 记录与缺行等价
        let zeros = progress(&[(11, 0), (21, 0)]);
        assert_eq!(computed_stage(&catalog(), &zeros), StageRole::Untrained);
    }

    #[test]
    fn touched_but_part1_incomplete_is_early_training() {
        let p = progress(&[(11, 50)]);
        assert_eq!(computed_stage(&catalog(), &p), StageRole::EarlyTraining);

        // 4/5 门 100% 也还是初训
        let p = progress(&all_at_100(&[11, 12, 13, 14]));
        assert_eq!(computed_stage(&catalog(), &p), StageRole::EarlyTraining);
    }

    #[test]
    fn part1_complete_part2_partial() {
        let mut entries = all_at_100(&[11, 12, 13, 14, 15]);
        entries.push((21, 50));
        assert_eq!(
            computed_stage(&catalog(), &progress(&entries)),
            StageRole::Part1Complete
        );
    }

    #[test]
    fn part2_complete_requires_part1_as_well() {
        // 阶段 2 全满但阶段 1 缺一门：仍是初训
        let mut entries = all_at_100(&[21, 22, 23]);
        entries.extend(all_at_100(&[11, 12, 13, 14]));
        assert_eq!(
            computed_stage(&catalog(), &progress(&entries)),
            StageRole::EarlyTraining
        );
    }

    #[test]
    fn part3_complete_at_top_of_ladder() {
        let entries = all_at_100(&[11, 12, 13, 14, 15, 21, 22, 23, 31, 32]);
        assert_eq!(
            computed_stage(&catalog(), &progress(&entries)),
            StageRole::Part3Complete
        );
    }

    #[test]
    fn staff_members_never_in_changed_output() {
        let members = vec![
            member(1, StageRole::FullMember),
            member(2, StageRole::Elite),
            member(3, StageRole::Leader),
        ];
        // 全员零进度：普通成员会被拉回 untrained，但管理阶层不动
        let plan = plan_sync(&members, &catalog(), &HashMap::new());
        assert!(plan.changed.is_empty());
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn pre_exam_incomplete_goes_to_warnings_not_changed() {
        let members = vec![member(1, StageRole::PreExam)];
        let mut by_member = HashMap::new();
        by_member.insert(1, progress(&all_at_100(&[11, 12, 13, 14, 15])));

        let plan = plan_sync(&members, &catalog(), &by_member);
        assert!(plan.changed.is_empty());
        assert_eq!(plan.warnings, vec![1]);
    }

    #[test]
    fn pre_exam_with_full_part3_is_left_alone() {
        let members = vec![member(1, StageRole::PreExam)];
        let mut by_member = HashMap::new();
        by_member.insert(
            1,
            progress(&all_at_100(&[11, 12, 13, 14, 15, 21, 22, 23, 31, 32])),
        );

        let plan = plan_sync(&members, &catalog(), &by_member);
        assert!(plan.changed.is_empty());
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn sync_is_idempotent() {
        let mut members = vec![member(1, StageRole::Untrained)];
        let mut by_member = HashMap::new();
        let mut entries = all_at_100(&[11, 12, 13, 14, 15]);
        entries.push((21, 50));
        by_member.insert(1, progress(&entries));

        let plan = plan_sync(&members, &catalog(), &by_member);
        assert_eq!(plan.changed, vec![(1, StageRole::Part1Complete)]);

        // 应用后再跑一遍：无变化
        members[0].stage_role = StageRole::Part1Complete;
        let plan2 = plan_sync(&members, &catalog(), &by_member);
        assert!(plan2.changed.is_empty());
    }

    #[test]
    fn end_to_end_example_member_m() {
        // 成员 M：5 门阶段 1 全 100%，1 门阶段 2 为 50%
        let members = vec![member(7, StageRole::EarlyTraining)];
        let mut by_member = HashMap::new();
        let mut entries = all_at_100(&[11, 12, 13, 14, 15]);
        entries.push((21, 50));
        by_member.insert(7, progress(&entries));

        let plan = plan_sync(&members, &catalog(), &by_member);
        assert_eq!(plan.changed, vec![(7, StageRole::Part1Complete)]);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn unknown_course_codes_are_skipped() {
        let courses = vec![course(11, "1.1"), course(99, "misc")];
        let parts = CatalogParts::from_courses(&courses);
        assert_eq!(parts.courses_of(1), &[11]);
        // "misc" 不参与任何阶段
        let p = progress(&[(11, 100)]);
        assert!(parts.complete_through(1, &p));
    }
}
