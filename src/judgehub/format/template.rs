//! Pull request bodies, one per judge.

pub(super) const BAEKJOON: &str = r#"# 🧩 알고리즘 문제 풀이
## 📝 문제 정보
- **플랫폼:** 백준 (BOJ)
- **문제 이름:** {{problem_id}} {{title}}
- **문제 링크:** {{link}}
- **난이도:** {{level}}
- **알고리즘 유형:** {{category}}
- **제출 일자:** {{date}}

## 💡 문제 설명
{{description}}

### 입력
{{input}}

### 출력
{{output}}

## ⏱️ 성능 요약
### 메모리
{{memory}} KB
### 시간
{{runtime}} ms

## 🤔 접근 방법
{{approach}}

## 🤯 어려웠던 점
{{difficulty}}

## 📚 배운 점
{{learned}}

## ✅ 자가 체크리스트
- [ ] 코드가 모든 테스트 케이스를 통과하나요?
- [ ] 코드에 주석을 충분히 달았나요?


> 출처: Baekjoon Online Judge, https://www.acmicpc.net/problemset
"#;

pub(super) const PROGRAMMERS: &str = r#"# 🧩 알고리즘 문제 풀이
## 📝 문제 정보
- **플랫폼:** 프로그래머스 (programmers)
- **문제 이름:** {{problem_id}} {{title}}
- **문제 링크:** {{link}}
- **난이도:** Lv.{{level}}
- **알고리즘 유형:** {{category}}
- **제출 일자:** {{date}}

## 💡 문제 설명
{{description}}

## ⏱️ 성능 요약
### 메모리
{{memory}}
### 시간
{{runtime}}

## 🤔 접근 방법
{{approach}}

## 🤯 어려웠던 점
{{difficulty}}

## 📚 배운 점
{{learned}}

## ✅ 자가 체크리스트

- [ ] 코드가 모든 테스트 케이스를 통과하나요?
- [ ] 코드에 주석을 충분히 달았나요?


> 출처: 프로그래머스 코딩 테스트 연습, https://school.programmers.co.kr/learn/challenges
"#;

pub(super) const SWEA: &str = r#"# 🧩 알고리즘 문제 풀이
## 📝 문제 정보
- **플랫폼:** SW Expert Academy (SWEA)
- **문제 이름:** {{problem_id}} {{title}}
- **문제 링크:** {{link}}
- **난이도:** {{level}}
- **알고리즘 유형:** {{algorithm}}
- **제출 일자:** {{date}}

## 💡 문제 설명
※ 직접 작성하세요.

## ⏱️ 성능 요약
### 메모리
{{memory}}
### 시간
{{runtime}}
### 코드길이
{{code_length}} Bytes

## 🤔 접근 방법
{{approach}}

## 🤯 어려웠던 점
{{difficulty}}

## 📚 배운 점
{{learned}}

## ✅ 자가 체크리스트
- [ ] 코드가 모든 테스트 케이스를 통과하나요?
- [ ] 코드에 주석을 충분히 달았나요?


> 출처: SW Expert Academy, https://swexpertacademy.com/main/code/problem/problemList.do
"#;
