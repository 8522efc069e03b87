//! 课程重排 (Course Reorder)
//!
//! 拖拽后给某一阶段的课程按新顺序重新编号：code 变成
//! `"{part}.{pos}"` (pos 从 1 连续)，sort_order 保证全目录按
//! 阶段 + 阶段内位置排序。其他阶段不受影响。

/// 一门课程重排后的新值
pub type Renumbered = (i64, String, i64);

/// 阶段内 sort_order 的步距：part*1000 + pos，跨阶段天然有序
const PART_ORDER_SPAN: i64 = 1000;

/// 按新顺序重编号 (稳定重排，纯函数)
pub fn renumber_part(part: u32, ordered_ids: &[i64]) -> Vec<Renumbered> {
    ordered_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            let pos = idx as i64 + 1;
            let code = format!("{part}.{pos}");
            let sort_order = i64::from(part) * PART_ORDER_SPAN + pos;
            (*id, code, sort_order)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_last_to_front_renumbers_contiguously() {
        // 5 门课，把第 5 个拖到第 1 位
        let new_order = [105, 101, 102, 103, 104];
        let result = renumber_part(1, &new_order);

        let codes: Vec<&str> = result.iter().map(|(_, c, _)| c.as_str()).collect();
        assert_eq!(codes, vec!["1.1", "1.2", "1.3", "1.4", "1.5"]);
        // 新顺序保持
        let ids: Vec<i64> = result.iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, new_order);
    }

    #[test]
    fn sort_orders_are_contiguous_within_part() {
        let result = renumber_part(2, &[7, 8, 9]);
        let orders: Vec<i64> = result.iter().map(|(_, _, o)| *o).collect();
        assert_eq!(orders, vec![2001, 2002, 2003]);
    }

    #[test]
    fn parts_do_not_overlap_in_sort_order() {
        let part1 = renumber_part(1, &[1, 2, 3]);
        let part2 = renumber_part(2, &[4]);
        let max1 = part1.iter().map(|(_, _, o)| *o).max().unwrap();
        let min2 = part2.iter().map(|(_, _, o)| *o).min().unwrap();
        assert!(max1 < min2);
    }

    #[test]
    fn empty_part_is_a_noop() {
        assert!(renumber_part(1, &[]).is_empty());
    }
}
