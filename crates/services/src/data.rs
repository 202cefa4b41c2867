//! Bundled datasets for the embedded and backup ingestion tiers.

use pairs_core::model::{WordEntry, WordPairRecord};

/// The full 98-group word-pair table, bundled so the trainer works without a
/// reachable remote dataset.
pub const EMBEDDED_CSV: &str = r#"an vs ang,"饭 (fàn, 米饭)","放 (fàng, 放学)"
,"碗 (wǎn, 饭碗)","网 (wǎng, 上网)"
,"玩 (wán, 玩耍)","王 (wáng, 国王)"
,"蓝 (lán, 蓝天)","狼 (láng, 大灰狼)"
,"看 (kàn, 看见)","炕 (kàng, 火炕)"
,"山 (shān, 高山)","伤 (shāng, 受伤)"
,"扇 (shàn, 风扇)","上 (shàng, 上面)"
,"班 (bān, 班长)","帮 (bāng, 帮助)"
,"反 (fǎn, 正反)","房 (fáng, 房子)"
,"蛋 (dàn, 鸡蛋)","糖 (táng, 糖果)"
,"盘 (pán, 盘子)","旁 (páng, 旁边)"
,"男 (nán, 男孩)","囊 (náng, 口袋)"
,"懒 (lǎn, 偷懒)","狼 (láng, 大灰狼)"
,"干 (gān, 干净)","刚 (gāng, 刚才)"
,"看 (kàn, 看见)","康 (kāng, 健康)"
,"寒 (hán, 寒冷)","航 (háng, 航行)"
,"站 (zhàn, 车站)","张 (zhāng, 张开)"
,"产 (chǎn, 产品)","长 (cháng, 长短)"
,"山 (shān, 大山)","伤 (shāng, 受伤)"
,"然 (rán, 然后)","让 (ràng, 让开)"
,"伞 (sǎn, 雨伞)","桑 (sāng, 桑树)"
,"但 (dàn, 但是)","当 (dāng, 当时)"
,"谈 (tán, 谈话)","唐 (táng, 唐朝)"
,"南 (nán, 南方)","囊 (náng, 行囊)"
,"兰 (lán, 兰花)","狼 (láng, 灰狼)"
,"甘 (gān, 甘甜)","刚 (gāng, 刚刚)"
,"砍 (kǎn, 砍树)","康 (kāng, 健康)"
,"汉 (hàn, 汉字)","行 (háng, 行业)"
,"战 (zhàn, 战争)","丈 (zhàng, 丈夫)"
,"蝉 (chán, 蝉鸣)","常 (cháng, 经常)"
en vs eng,"门 (mén, 房门)","梦 (mèng, 做梦)"
,"分 (fēn, 分开)","风 (fēng, 大风)"
,"真 (zhēn, 真实)","争 (zhēng, 争抢)"
,"身 (shēn, 身体)","声 (shēng, 声音)"
,"本 (běn, 书本)","崩 (bēng, 崩开)"
,"针 (zhēn, 打针)","正 (zhèng, 正确)"
,"人 (rén, 大人)","仍 (réng, 仍然)"
,"跟 (gēn, 跟从)","更 (gèng, 更加)"
,"盆 (pén, 花盆)","朋 (péng, 朋友)"
,"深 (shēn, 深浅)","生 (shēng, 生日)"
,"什 (shén, 什么)","省 (shěng, 节省)"
,"怎 (zěn, 怎么)","增 (zēng, 增加)"
,"森 (sēn, 森林)","僧 (sēng, 僧人)"
,"陈 (chén, 姓陈)","成 (chéng, 成功)"
,"神 (shén, 神仙)","绳 (shéng, 绳子)"
,"跟 (gēn, 跟着)","耕 (gēng, 耕田)"
,"肯 (kěn, 肯定)","坑 (kēng, 水坑)"
,"恨 (hèn, 可恨)","横 (héng, 横线)"
,"珍 (zhēn, 珍贵)","争 (zhēng, 争吵)"
,"尘 (chén, 灰尘)","成 (chéng, 成为)"
,"身 (shēn, 身高)","生 (shēng, 生活)"
,"认 (rèn, 认识)","扔 (rēng, 扔球)"
,"根 (gēn, 树根)","更 (gēng, 更改)"
,"肯 (kěn, 肯干)","坑 (kēng, 土坑)"
,"痕 (hén, 痕迹)","横 (héng, 横竖)"
,"真 (zhēn, 真心)","蒸 (zhēng, 蒸发)"
,"晨 (chén, 早晨)","城 (chéng, 城市)"
,"深 (shēn, 深山)","声 (shēng, 声响)"
,"仁 (rén, 果仁)","仍 (réng, 仍旧)"
in vs ing,"心 (xīn, 心情)","星 (xīng, 星星)"
,"新 (xīn, 新旧)","行 (xíng, 行走)"
,"金 (jīn, 金色)","睛 (jīng, 眼睛)"
,"音 (yīn, 声音)","英 (yīng, 英雄)"
,"林 (lín, 树林)","零 (líng, 零钱)"
,"亲 (qīn, 亲人)","清 (qīng, 清水)"
,"进 (jìn, 前进)","静 (jìng, 安静)"
,"民 (mín, 人民)","名 (míng, 名字)"
,"您 (nín, 您好)","宁 (níng, 安宁)"
,"信 (xìn, 信件)","幸 (xìng, 幸福)"
,"今 (jīn, 今天)","京 (jīng, 北京)"
,"因 (yīn, 因为)","应 (yīng, 应该)"
,"宾 (bīn, 宾客)","冰 (bīng, 冰块)"
,"贫 (pín, 贫穷)","平 (píng, 平安)"
,"敏 (mǐn, 敏捷)","明 (míng, 明亮)"
,"今 (jīn, 今年)","经 (jīng, 经过)"
,"引 (yǐn, 引导)","影 (yǐng, 电影)"
,"拼 (pīn, 拼图)","乒 (pīng, 乒乓球)"
,"民 (mín, 农民)","名 (míng, 名气)"
,"近 (jìn, 近处)","镜 (jìng, 镜子)"
,"阴 (yīn, 阴天)","英 (yīng, 英国)"
,"彬 (bīn, 彬彬有礼)","兵 (bīng, 士兵)"
,"品 (pǐn, 用品)","平 (píng, 平地)"
,"您 (nín, 您早)","凝 (níng, 凝聚)"
,"进 (jìn, 进入)","惊 (jīng, 惊讶)"
,"印 (yìn, 印章)","硬 (yìng, 坚硬)"
,"频 (pín, 频率)","瓶 (píng, 瓶子)"
,"林 (lín, 丛林)","灵 (líng, 灵活)"
,"亲 (qīn, 亲切)","轻 (qīng, 轻重)"
ian vs iang,"烟 (yān, 烟雾)","羊 (yáng, 小羊)"
,"脸 (liǎn, 脸蛋)","两 (liǎng, 两个)"
,"尖 (jiān, 笔尖)","江 (jiāng, 江河)"
,"钱 (qián, 钱包)","墙 (qiáng, 墙面)"
,"先 (xiān, 先后)","香 (xiāng, 香味)"
uan vs uang,"玩 (wán, 好玩)","王 (wáng, 王子)"
,"关 (guān, 关门)","光 (guāng, 阳光)"
,"欢 (huān, 欢乐)","慌 (huāng, 慌张)"
,"船 (chuán, 小船)","床 (chuáng, 木床)"
,"环 (huán, 耳环)","黄 (huáng, 黄色)"
"#;

/// Last-resort dataset so the repository is never empty even when both the
/// remote and embedded tiers produce zero records.
#[must_use]
pub fn backup_records() -> Vec<WordPairRecord> {
    const ROWS: [(&str, &str, &str, &str); 11] = [
        ("班", "bān", "帮", "bāng"),
        ("餐", "cān", "仓", "cāng"),
        ("单", "dān", "当", "dāng"),
        ("烦", "fán", "方", "fāng"),
        ("肝", "gān", "刚", "gāng"),
        ("汗", "hàn", "行", "háng"),
        ("监", "jiān", "江", "jiāng"),
        ("兰", "lán", "狼", "láng"),
        ("满", "mǎn", "忙", "máng"),
        ("南", "nán", "囊", "náng"),
        ("盘", "pán", "旁", "páng"),
    ];

    ROWS.iter()
        .map(|&(front, front_pinyin, back, back_pinyin)| {
            WordPairRecord::new(
                "基础词汇",
                WordEntry::new(front, front_pinyin),
                WordEntry::new(back, back_pinyin),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_core::parse::parse_rows;

    #[test]
    fn embedded_dataset_parses_to_ninety_eight_groups() {
        let records = parse_rows(EMBEDDED_CSV);
        assert_eq!(records.len(), 98);
        assert_eq!(records[0].category, "an vs ang");
        assert_eq!(records[0].front.text, "饭");
        assert_eq!(records[0].front.pinyin, "fàn");
        // carry-forward reaches the last uan vs uang row
        assert_eq!(records[97].category, "uan vs uang");
    }

    #[test]
    fn backup_dataset_is_never_empty() {
        let records = backup_records();
        assert!(records.len() >= 10);
        assert!(records.iter().all(|r| !r.front.text.is_empty()));
        assert!(records.iter().all(|r| !r.back.text.is_empty()));
    }
}
